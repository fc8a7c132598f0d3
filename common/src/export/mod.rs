//! Export core shared by the CLI export commands.
//!
//! 一覧・履歴を「バーコード / フォーマット / 読取日時」の3列に変換する。

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::types::ScanEvent;
use chrono::{DateTime, FixedOffset};
#[cfg(feature = "excel")]
use crate::error::{Error, Result};

/// 列見出し
pub const HEADERS: [&str; 3] = ["バーコード", "フォーマット", "読取日時"];

/// シート名
pub const SHEET_NAME: &str = "バーコード一覧";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// 出力1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub barcode: String,
    pub format: String,
    pub captured_at: String,
}

impl ExportRow {
    pub fn from_event(event: &ScanEvent, offset: &FixedOffset) -> Self {
        Self {
            barcode: event.payload.clone(),
            format: event.format.clone(),
            captured_at: format_timestamp(event.captured_at, offset),
        }
    }

    pub fn cells(&self) -> [&str; 3] {
        [&self.barcode, &self.format, &self.captured_at]
    }
}

/// 一覧を出力行に変換（並び順はそのまま）
pub fn to_rows(events: &[ScanEvent], offset: &FixedOffset) -> Vec<ExportRow> {
    events
        .iter()
        .map(|e| ExportRow::from_event(e, offset))
        .collect()
}

/// 一覧をxlsxのバイト列に変換
#[cfg(feature = "excel")]
pub fn generate_excel(events: &[ScanEvent], offset: &FixedOffset) -> Result<Vec<u8>> {
    let rows = to_rows(events, offset);
    excel_core::generate_excel_buffer(&rows, SHEET_NAME).map_err(Error::Excel)
}

/// エポックミリ秒を表示用文字列に変換
pub fn format_timestamp(millis: i64, offset: &FixedOffset) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(offset)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        None => "-".to_string(),
    }
}
