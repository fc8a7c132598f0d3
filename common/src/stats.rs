//! 棚卸し統計

use crate::types::ScanEvent;
use serde::Serialize;
use std::collections::HashSet;

/// 一覧の集計結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: usize,
    pub unique_items: usize,
    /// 1分あたりの読取数（算出できない場合は "-"）
    pub scan_rate: String,
}

impl InventoryStats {
    /// 読取一覧から集計（並び順は問わない）
    pub fn from_events(events: &[ScanEvent]) -> Self {
        let unique: HashSet<&str> = events.iter().map(|e| e.payload.as_str()).collect();

        Self {
            total_items: events.len(),
            unique_items: unique.len(),
            scan_rate: scan_rate(events),
        }
    }
}

fn scan_rate(events: &[ScanEvent]) -> String {
    let first = events.iter().map(|e| e.captured_at).min();
    let last = events.iter().map(|e| e.captured_at).max();

    match (first, last) {
        (Some(first), Some(last)) if events.len() > 1 && last > first => {
            let minutes = (i128::from(last) - i128::from(first)) as f64 / 60_000.0;
            format!("{:.1}/分", events.len() as f64 / minutes)
        }
        _ => "-".to_string(),
    }
}
