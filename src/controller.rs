//! セッションコントローラ
//!
//! セッション一覧・履歴・設定・ストアを所有し、デコーダからの読取を
//! 取込パイプラインに渡して、履歴の保存とUI向けフィードバックへの変換を行う。
//! 読取は到着順に1件ずつ同期的に処理する（並行書き込みは想定しない）。

use crate::config::Settings;
use crate::error::{BarkodxError, Result};
use barkodx_common::store::{erase_history, load_history, save_history};
use barkodx_common::{
    ingest, normalize_manual_entry, BlobStore, ClearHistory, Directive, HistoryLog, SessionList,
};
use std::fmt;
use tracing::{debug, info, warn};

/// 読取の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// 棚卸し（一覧・履歴に取り込む）
    #[default]
    Inventory,
    /// 商品検索（取り込まずに検索対象にする）
    Lookup,
}

impl std::str::FromStr for CaptureMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inventory" | "scan" => Ok(CaptureMode::Inventory),
            "lookup" | "browser" => Ok(CaptureMode::Lookup),
            _ => Err(format!("Unknown mode: {}. Use inventory or lookup", s)),
        }
    }
}

/// トースト表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Accepted(String),
    Duplicate(String),
    Lookup(String),
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toast::Accepted(code) => write!(f, "{}", code),
            Toast::Duplicate(code) => write!(f, "{} (重複)", code),
            Toast::Lookup(code) => write!(f, "検索: {}", code),
        }
    }
}

/// UI層が行うべきフィードバック
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feedback {
    pub toast: Option<Toast>,
    pub vibrate: bool,
    pub beep: bool,
    /// 少し待ってから一覧表示へ移る
    pub advance_view: bool,
}

impl Feedback {
    fn cue(settings: &Settings, toast: Toast) -> Self {
        Self {
            toast: Some(toast),
            vibrate: settings.vibration,
            beep: settings.sound,
            advance_view: false,
        }
    }

    pub fn is_silent(&self) -> bool {
        self == &Feedback::default()
    }
}

pub struct SessionController<S: BlobStore> {
    settings: Settings,
    session: SessionList,
    history: HistoryLog,
    store: S,
    mode: CaptureMode,
    lookup_target: Option<String>,
}

impl<S: BlobStore> SessionController<S> {
    /// 保存済みの履歴を読み込んで開始（読み込めなければ空の履歴）
    pub fn new(settings: Settings, store: S) -> Self {
        let history = match load_history(&store) {
            Ok(history) => history,
            Err(e) => {
                warn!("履歴の読み込みに失敗、空の履歴で開始します: {}", e);
                HistoryLog::new()
            }
        };
        debug!(entries = history.len(), "履歴を読み込みました");

        Self {
            settings,
            session: SessionList::new(),
            history,
            store,
            mode: CaptureMode::default(),
            lookup_target: None,
        }
    }

    /// デコーダからの読取（現在時刻で処理）
    pub fn on_decoded_event(&mut self, payload: &str, format: Option<&str>) -> Feedback {
        let now = chrono::Utc::now().timestamp_millis();
        self.on_decoded_event_at(payload, format, now)
    }

    /// デコーダからの読取（時刻指定）
    pub fn on_decoded_event_at(&mut self, payload: &str, format: Option<&str>, now: i64) -> Feedback {
        if self.mode == CaptureMode::Lookup {
            debug!(payload, "ルックアップ対象を更新");
            self.lookup_target = Some(payload.to_string());
            return Feedback::cue(&self.settings, Toast::Lookup(payload.to_string()));
        }

        let config = self.settings.ingestion_config();
        let result = ingest(payload, format, now, &config, &mut self.session, &mut self.history);

        if result.history_changed {
            self.persist_history();
        }

        if !result.directive.is_audible() {
            debug!(payload, "連続読取を無視");
            return Feedback::default();
        }

        match result.directive {
            Directive::Accepted { event } => {
                debug!(payload = %event.payload, format = %event.format, id = %event.id, "受理");
                let mut feedback = Feedback::cue(&self.settings, Toast::Accepted(event.payload));
                feedback.advance_view = result.should_advance_view;
                feedback
            }
            Directive::DuplicateNotice { payload } => {
                debug!(%payload, "重複のため追加せず");
                Feedback::cue(&self.settings, Toast::Duplicate(payload))
            }
            Directive::Suppressed => Feedback::default(),
        }
    }

    /// 手入力（前後の空白を除去、空なら拒否）
    pub fn submit_manual(&mut self, raw: &str) -> Result<Feedback> {
        let code = normalize_manual_entry(raw)
            .ok_or_else(|| BarkodxError::InvalidInput("バーコードが空です".into()))?;
        Ok(self.on_decoded_event(&code, None))
    }

    /// セッション一覧からIDで削除（履歴は変更しない）
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = barkodx_common::remove_from_session(&mut self.session, id);
        debug!(id, removed, "一覧から削除");
        removed
    }

    pub fn clear_session(&mut self) {
        barkodx_common::clear_session(&mut self.session);
        info!("セッション一覧をクリアしました");
    }

    /// 履歴を消去し、保存済みの履歴も削除
    pub fn clear_history(&mut self) {
        match barkodx_common::clear_history(&mut self.history) {
            ClearHistory::EraseDurableRecord => {
                if let Err(e) = erase_history(&mut self.store) {
                    warn!("保存済み履歴の削除に失敗: {}", e);
                }
            }
        }
        info!("履歴をクリアしました");
    }

    /// 設定を差し替え。履歴が有効になった場合は現在の履歴を保存
    pub fn set_settings(&mut self, settings: Settings) {
        let history_enabled = !self.settings.history && settings.history;
        self.settings = settings;
        if history_enabled {
            self.persist_history();
        }
    }

    pub fn set_mode(&mut self, mode: CaptureMode) {
        self.mode = mode;
        if mode == CaptureMode::Inventory {
            self.lookup_target = None;
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn lookup_target(&self) -> Option<&str> {
        self.lookup_target.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &SessionList {
        &self.session
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 書き込み失敗はログのみ（操作は継続）
    fn persist_history(&mut self) {
        if let Err(e) = save_history(&mut self.store, &self.history) {
            warn!("履歴の保存に失敗: {}", e);
        }
    }
}
