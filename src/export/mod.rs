pub mod excel;

use crate::error::{BarkodxError, Result};
use barkodx_common::ScanEvent;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// 出力対象
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportTarget {
    /// 現在のセッション一覧
    #[default]
    Session,
    /// 履歴
    History,
}

impl ExportTarget {
    /// ファイル名の接頭辞
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ExportTarget::Session => "バーコード一覧",
            ExportTarget::History => "履歴",
        }
    }
}

impl std::str::FromStr for ExportTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "session" | "list" => Ok(ExportTarget::Session),
            "history" => Ok(ExportTarget::History),
            _ => Err(format!("Unknown target: {}. Use session or history", s)),
        }
    }
}

impl std::fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportTarget::Session => write!(f, "session"),
            ExportTarget::History => write!(f, "history"),
        }
    }
}

/// 出力ファイルパス（ディレクトリ指定時は `{接頭辞}_{日付}.xlsx`）
pub fn output_path(output: &Path, target: ExportTarget, date: NaiveDate) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}_{}.xlsx", target.file_prefix(), date.format("%Y-%m-%d")))
    } else {
        output.to_path_buf()
    }
}

/// 一覧をExcelに出力し、出力先を返す
pub fn export_events(
    events: &[ScanEvent],
    target: ExportTarget,
    output: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    if events.is_empty() {
        return Err(BarkodxError::NothingToExport(target.file_prefix().to_string()));
    }

    let output_path = output_path(output, target, date);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    excel::generate_excel(events, &output_path)?;
    tracing::info!(count = events.len(), path = %output_path.display(), "Excel出力");

    Ok(output_path)
}
