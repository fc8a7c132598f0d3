//! スキャン結果の型定義
//!
//! CLIと取込パイプラインで共有される型:
//! - ScanEvent: 受理された1件の読取（セッション一覧・履歴の要素）
//! - IngestionConfig: 1回の取込で参照する設定スナップショット
//!
//! 保存形式は旧アプリの履歴JSON（`barcode` / `timestamp`）と互換。

use serde::{Deserialize, Serialize};

/// 手入力・フォーマット不明時のフォーマット値
pub const MANUAL_FORMAT: &str = "MANUAL/UNKNOWN";

/// 同一バーコードの連続読取を無視する時間幅（ミリ秒）
pub const ANTI_BOUNCE_WINDOW_MS: i64 = 1000;

/// 受理後に一覧画面へ遷移するまでの待ち時間（ミリ秒）
pub const ADVANCE_VIEW_DELAY_MS: u64 = 500;

/// トースト表示時間（ミリ秒）
pub const TOAST_DURATION_MS: u64 = 2000;

/// 受理済みの読取1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    /// 削除用の一意ID（重複判定には使わない）
    pub id: String,

    /// 読取テキスト（重複判定のキー）
    #[serde(rename = "barcode")]
    pub payload: String,

    /// シンボル体系（EAN_13 など）
    #[serde(default = "default_format")]
    pub format: String,

    /// 受理時刻（UNIXエポックからのミリ秒）
    #[serde(rename = "timestamp")]
    pub captured_at: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_format() -> String {
    MANUAL_FORMAT.to_string()
}

impl ScanEvent {
    /// 新しいIDで読取を生成
    pub fn new(payload: impl Into<String>, format: Option<&str>, captured_at: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            payload: payload.into(),
            format: normalize_format(format),
            captured_at,
            note: None,
        }
    }

    /// 手入力由来かどうか
    pub fn is_manual(&self) -> bool {
        self.format == MANUAL_FORMAT
    }
}

/// デコーダのフォーマット名を正規化（未指定・空文字は手入力扱い）
pub fn normalize_format(format: Option<&str>) -> String {
    match format.map(str::trim) {
        Some(f) if !f.is_empty() => f.to_string(),
        _ => default_format(),
    }
}

/// 取込時に参照する設定のスナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionConfig {
    /// false の場合、セッション内に既にあるバーコードは追加しない
    pub allow_duplicates: bool,
    /// 履歴への書き込み可否
    pub history_enabled: bool,
    /// 連続スキャンモード（false なら受理後に一覧へ遷移）
    pub batch_mode: bool,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            allow_duplicates: true,
            history_enabled: true,
            batch_mode: false,
        }
    }
}
