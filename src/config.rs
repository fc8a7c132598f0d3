use crate::error::{BarkodxError, Result};
use barkodx_common::IngestionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.json";

/// アプリ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// 連続スキャン（受理後に一覧へ遷移しない）
    pub batch_scan: bool,
    pub vibration: bool,
    pub sound: bool,
    /// 履歴の記録
    pub history: bool,
    pub allow_duplicates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            batch_scan: false,
            vibration: true,
            sound: true,
            history: true,
            allow_duplicates: true,
        }
    }
}

impl Settings {
    /// 既定の設定ディレクトリから読み込み
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir()?)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE_NAME);

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let settings: Settings = serde_json::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join(SETTINGS_FILE_NAME), content)?;
        Ok(())
    }

    /// 設定・履歴の保存先（~/.config/barkodx）
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BarkodxError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("barkodx"))
    }

    /// 取込1回分の設定スナップショット
    pub fn ingestion_config(&self) -> IngestionConfig {
        IngestionConfig {
            allow_duplicates: self.allow_duplicates,
            history_enabled: self.history,
            batch_mode: self.batch_scan,
        }
    }

    /// `key=value` 形式で1項目を変更
    pub fn apply(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| BarkodxError::Config(format!("KEY=VALUE 形式で指定してください: {}", assignment)))?;

        let value = parse_bool(value.trim())
            .ok_or_else(|| BarkodxError::Config(format!("真偽値ではありません: {}", value)))?;

        match key.trim() {
            "batch_scan" | "batchScan" => self.batch_scan = value,
            "vibration" => self.vibration = value,
            "sound" => self.sound = value,
            "history" => self.history = value,
            "allow_duplicates" | "allowDuplicates" => self.allow_duplicates = value,
            other => return Err(BarkodxError::Config(format!("不明な設定項目: {}", other))),
        }
        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
