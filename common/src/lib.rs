//! BarkodX Common Library
//!
//! CLIと共有される型・取込パイプライン・出力処理

pub mod types;
pub mod collections;
pub mod pipeline;
pub mod stats;
pub mod lookup;
pub mod export;
pub mod store;
pub mod error;

pub use types::{ScanEvent, IngestionConfig, MANUAL_FORMAT, ANTI_BOUNCE_WINDOW_MS};
pub use collections::{SessionList, HistoryLog};
pub use pipeline::{
    ingest, remove_from_session, clear_session, clear_history, normalize_manual_entry,
    ClearHistory, Directive, IngestionResult,
};
pub use stats::InventoryStats;
pub use lookup::SearchPlatform;
pub use export::{to_rows, ExportRow};
pub use store::{BlobStore, FileStore, MemoryStore, HISTORY_KEY};
pub use error::{Error, Result};
