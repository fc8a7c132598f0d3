//! セッション一覧と履歴
//!
//! - SessionList: 追加順（古い順）に保持、表示は新しい順。プロセス終了で消える
//! - HistoryLog: 先頭に追加（新しい順）。永続化は呼び出し側の責務

use crate::types::{ScanEvent, ANTI_BOUNCE_WINDOW_MS};
use serde::{Deserialize, Serialize};

/// 同一バーコードが連続読取の時間幅内にあるか
fn within_anti_bounce(entry: &ScanEvent, payload: &str, now: i64) -> bool {
    entry.payload == payload && now.saturating_sub(entry.captured_at) < ANTI_BOUNCE_WINDOW_MS
}

/// 現在の棚卸し作業のスキャン一覧
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionList {
    entries: Vec<ScanEvent>,
}

impl SessionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最後に追加された読取
    pub fn last(&self) -> Option<&ScanEvent> {
        self.entries.last()
    }

    /// 最後の読取と同一バーコードで時間幅内か
    pub fn bounces(&self, payload: &str, now: i64) -> bool {
        self.last()
            .is_some_and(|last| within_anti_bounce(last, payload, now))
    }

    /// 一覧のどこかに同じバーコードがあるか
    pub fn contains_payload(&self, payload: &str) -> bool {
        self.entries.iter().any(|e| e.payload == payload)
    }

    pub fn push(&mut self, event: ScanEvent) {
        self.entries.push(event);
    }

    /// IDで1件削除。削除できたら true
    pub fn remove(&mut self, id: &str) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 追加順（古い順）
    pub fn as_slice(&self) -> &[ScanEvent] {
        &self.entries
    }

    /// 表示順（新しい順）
    pub fn iter_newest_first(&self) -> impl ExactSizeIterator<Item = &ScanEvent> {
        self.entries.iter().rev()
    }
}

/// 永続化される読取履歴（新しい順）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<ScanEvent>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みの一覧から復元（先頭が最新であること）
    pub fn from_entries(entries: Vec<ScanEvent>) -> Self {
        Self { entries }
    }

    /// 最新の履歴
    pub fn head(&self) -> Option<&ScanEvent> {
        self.entries.first()
    }

    /// 先頭と同一バーコードで時間幅内か（セッション側の判定とは独立）
    pub fn bounces(&self, payload: &str, now: i64) -> bool {
        self.head()
            .is_some_and(|head| within_anti_bounce(head, payload, now))
    }

    pub fn prepend(&mut self, event: ScanEvent) {
        self.entries.insert(0, event);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 新しい順
    pub fn as_slice(&self) -> &[ScanEvent] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(payload: &str, at: i64) -> ScanEvent {
        ScanEvent::new(payload, Some("EAN_13"), at)
    }

    #[test]
    fn test_session_display_order() {
        let mut session = SessionList::new();
        session.push(event("1", 0));
        session.push(event("2", 10));
        session.push(event("3", 20));

        let shown: Vec<&str> = session.iter_newest_first().map(|e| e.payload.as_str()).collect();
        assert_eq!(shown, vec!["3", "2", "1"]);
        assert_eq!(session.last().map(|e| e.payload.as_str()), Some("3"));
    }

    #[test]
    fn test_session_bounce_only_checks_last() {
        let mut session = SessionList::new();
        session.push(event("A", 0));
        session.push(event("B", 100));

        assert!(session.bounces("B", 500));
        assert!(!session.bounces("B", 1100)); // ちょうど1000msは時間幅外
        assert!(!session.bounces("A", 200)); // 直前の読取ではない
    }

    #[test]
    fn test_session_remove() {
        let mut session = SessionList::new();
        let first = event("A", 0);
        let id = first.id.clone();
        session.push(first);
        session.push(event("B", 10));

        assert!(session.remove(&id));
        assert_eq!(session.len(), 1);
        assert!(!session.remove(&id));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_history_prepend_keeps_newest_first() {
        let mut history = HistoryLog::new();
        history.prepend(event("old", 0));
        history.prepend(event("new", 5000));

        assert_eq!(history.head().map(|e| e.payload.as_str()), Some("new"));
        assert!(history.bounces("new", 5999));
        assert!(!history.bounces("old", 5001));
    }

    #[test]
    fn test_history_serializes_as_plain_array() {
        let history = HistoryLog::from_entries(vec![event("111", 1)]);
        let json = serde_json::to_string(&history).expect("シリアライズ失敗");
        assert!(json.starts_with('['));

        let restored: HistoryLog = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert_eq!(restored, history);
    }
}
