//! Excel出力の統合テスト

use barkodx_common::ScanEvent;
use barkodx_rust::export::{excel, export_events, ExportTarget};
use chrono::NaiveDate;
use tempfile::tempdir;

fn create_test_event(index: usize) -> ScanEvent {
    ScanEvent::new(
        format!("869000000000{}", index),
        Some("EAN_13"),
        1_700_000_000_000 + index as i64 * 2000,
    )
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

#[test]
fn test_excel_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("test_output.xlsx");

    let events: Vec<ScanEvent> = (1..=5).map(create_test_event).collect();

    let result = excel::generate_excel(&events, &output_path);

    assert!(result.is_ok(), "Excel生成に失敗: {:?}", result.err());
    assert!(output_path.exists(), "Excelファイルが作成されていない");

    let bytes = std::fs::read(&output_path).expect("ファイル読み込み失敗");
    assert!(bytes.starts_with(b"PK"), "xlsx形式ではない");
}

#[test]
fn test_export_session_to_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let events: Vec<ScanEvent> = (1..=3).map(create_test_event).collect();

    let path = export_events(&events, ExportTarget::Session, dir.path(), date())
        .expect("出力失敗");

    assert_eq!(path, dir.path().join("バーコード一覧_2026-10-18.xlsx"));
    assert!(path.exists());
}

#[test]
fn test_export_history_to_new_subdirectory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("exports");
    let events = vec![create_test_event(1)];

    let path = export_events(&events, ExportTarget::History, &output, date())
        .expect("出力失敗");

    assert_eq!(path, output.join("履歴_2026-10-18.xlsx"));
    assert!(path.exists());
}

#[test]
fn test_export_to_explicit_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("sayim.xlsx");
    let events = vec![ScanEvent::new("MANUAL-1", None, 0)];

    let path = export_events(&events, ExportTarget::Session, &output, date())
        .expect("出力失敗");

    assert_eq!(path, output);
    let metadata = std::fs::metadata(&path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "Excelファイルが空");
}
