//! 読取イベント取込パイプライン
//!
//! デコーダから届いた `(payload, format)` を1件ずつ判定し、
//! セッション一覧・履歴を更新して、UI向けの指示（Directive）を返す。
//!
//! 判定順:
//! 1. 連続読取（直前と同一・1000ms以内）→ 無視（Suppressed）
//! 2. 重複禁止設定で一覧に既出 → 追加せず通知のみ（DuplicateNotice）
//! 3. 受理 → 一覧に追加、履歴が有効なら履歴先頭にも追加（Accepted）
//!
//! I/Oは行わない。履歴の永続化は `history_changed` を見て呼び出し側が行う。

use crate::collections::{HistoryLog, SessionList};
use crate::types::{IngestionConfig, ScanEvent};

/// UI層への指示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// 新しい読取として受理
    Accepted { event: ScanEvent },
    /// 重複のため追加しなかった（読取自体は通知する）
    DuplicateNotice { payload: String },
    /// 連続読取として黙って捨てた
    Suppressed,
}

impl Directive {
    /// 振動・音を鳴らす対象か（実際に鳴らすかは呼び出し側の設定次第）
    pub fn is_audible(&self) -> bool {
        !matches!(self, Directive::Suppressed)
    }

    pub fn accepted_event(&self) -> Option<&ScanEvent> {
        match self {
            Directive::Accepted { event } => Some(event),
            _ => None,
        }
    }
}

/// 取込結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionResult {
    pub directive: Directive,
    /// 受理後に一覧画面へ遷移すべきか（一括モードでない場合）
    pub should_advance_view: bool,
    /// 履歴が更新されたか（永続化が必要）
    pub history_changed: bool,
}

impl IngestionResult {
    fn unchanged(directive: Directive) -> Self {
        Self {
            directive,
            should_advance_view: false,
            history_changed: false,
        }
    }
}

/// 読取1件を取り込む
pub fn ingest(
    payload: &str,
    format: Option<&str>,
    now: i64,
    config: &IngestionConfig,
    session: &mut SessionList,
    history: &mut HistoryLog,
) -> IngestionResult {
    if session.bounces(payload, now) {
        return IngestionResult::unchanged(Directive::Suppressed);
    }

    if !config.allow_duplicates && session.contains_payload(payload) {
        return IngestionResult::unchanged(Directive::DuplicateNotice {
            payload: payload.to_string(),
        });
    }

    // 時計が戻っても追加順と時刻の順序を崩さない
    let captured_at = session
        .last()
        .map_or(now, |last| now.max(last.captured_at));
    let event = ScanEvent::new(payload, format, captured_at);

    session.push(event.clone());

    let history_changed = config.history_enabled && !history.bounces(payload, now);
    if history_changed {
        history.prepend(event.clone());
    }

    IngestionResult {
        directive: Directive::Accepted { event },
        should_advance_view: !config.batch_mode,
        history_changed,
    }
}

/// セッション一覧からIDで1件削除（履歴には触れない）
pub fn remove_from_session(session: &mut SessionList, id: &str) -> bool {
    session.remove(id)
}

/// セッション一覧を空にする
pub fn clear_session(session: &mut SessionList) {
    session.clear();
}

/// 履歴削除後に呼び出し側が行うべき処理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ClearHistory {
    /// 永続化済みの履歴を削除する
    EraseDurableRecord,
}

/// 履歴を空にする
pub fn clear_history(history: &mut HistoryLog) -> ClearHistory {
    history.clear();
    ClearHistory::EraseDurableRecord
}

/// 手入力値の正規化。空白のみは None
pub fn normalize_manual_entry(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
