//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use barkodx_rust::config::Settings;
use barkodx_rust::error::BarkodxError;
use barkodx_rust::export::{export_events, ExportTarget};
use chrono::NaiveDate;
use tempfile::tempdir;

/// 空の一覧を出力した場合
#[test]
fn test_export_empty_session() {
    let dir = tempdir().expect("Failed to create temp dir");
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    let result = export_events(&[], ExportTarget::History, dir.path(), date);
    assert!(matches!(result, Err(BarkodxError::NothingToExport(_))));

    // ファイルは作られない
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// 壊れた設定ファイル
#[test]
fn test_corrupted_settings_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("settings.json"), "{ invalid json }").unwrap();

    let result = Settings::load_from(dir.path());
    assert!(matches!(result, Err(BarkodxError::JsonParse(_))));
}

/// BarkodxErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        BarkodxError::Config("テスト設定エラー".to_string()),
        BarkodxError::FileNotFound("scans.txt".to_string()),
        BarkodxError::ExcelGeneration("Excel生成エラー".to_string()),
        BarkodxError::NothingToExport("履歴".to_string()),
        BarkodxError::InvalidInput("空".to_string()),
        BarkodxError::UnknownCommand("frobnicate".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = BarkodxError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: BarkodxError = io_err.into();

    assert!(matches!(err, BarkodxError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: BarkodxError = json_err.into();

    assert!(matches!(err, BarkodxError::JsonParse(_)));
}

/// common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let common_err = barkodx_common::Error::Config("不正なキー".to_string());
    let err: BarkodxError = common_err.into();

    assert!(matches!(err, BarkodxError::Store(_)));
    assert!(format!("{}", err).contains("不正なキー"));
}
