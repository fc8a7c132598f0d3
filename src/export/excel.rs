//! Excel生成（CLI版）
//!
//! 共通ライブラリでバッファを作りファイルに書き出す

use crate::error::{BarkodxError, Result};
use barkodx_common::ScanEvent;
use chrono::{Local, Offset};
use std::path::Path;

/// 読取日時はローカル時刻で出力
pub fn generate_excel(events: &[ScanEvent], output_path: &Path) -> Result<()> {
    let offset = Local::now().offset().fix();

    let buffer = barkodx_common::export::generate_excel(events, &offset)
        .map_err(|e| BarkodxError::ExcelGeneration(e.to_string()))?;
    std::fs::write(output_path, buffer)?;

    Ok(())
}
