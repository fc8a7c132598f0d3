//! キー・値の永続化ストア
//!
//! 履歴はシリアライズした一覧を固定キー `barkodx_history` に丸ごと保存する。

use crate::collections::HistoryLog;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 履歴の保存キー
pub const HISTORY_KEY: &str = "barkodx_history";

/// 文字列を保存するストア
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// 削除。キーが無かった場合は false
    fn remove(&mut self, key: &str) -> Result<bool>;
}

/// ディレクトリ配下に `<key>.json` として保存するストア
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// キーに対応するファイルパス
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Config(format!("不正なキー: {}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// メモリ上のストア（テスト用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// 履歴を読み込み。未保存なら空
///
/// JSONが壊れている場合は `Error::Json` を返す（空にするかは呼び出し側が決める）。
pub fn load_history<S: BlobStore + ?Sized>(store: &S) -> Result<HistoryLog> {
    match store.get(HISTORY_KEY)? {
        Some(content) => Ok(serde_json::from_str(&content)?),
        None => Ok(HistoryLog::new()),
    }
}

/// 履歴全体を保存
pub fn save_history<S: BlobStore + ?Sized>(store: &mut S, history: &HistoryLog) -> Result<()> {
    let content = serde_json::to_string(history)?;
    store.set(HISTORY_KEY, &content)
}

/// 保存済みの履歴を削除
pub fn erase_history<S: BlobStore + ?Sized>(store: &mut S) -> Result<bool> {
    store.remove(HISTORY_KEY)
}
