//! Durable keyed storage of past runs. The whole mapping is rewritten as one
//! JSON snapshot on every mutation; that is O(history size) per write and a
//! known scalability ceiling, acceptable for a single-user store that holds a
//! handful of entries. Not safe under concurrent writers.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::warn;

use crate::{
    error::{DigestError, Result},
    types::HistoryEntry,
};

pub struct HistoryStore {
    path: PathBuf,
    entries: HashMap<String, HistoryEntry>,
}

impl HistoryStore {
    /// Open the store at `path`. A missing or unreadable snapshot yields an
    /// empty store rather than an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("history snapshot at {} is corrupt, starting empty: {e}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        HistoryStore { path, entries }
    }

    /// Open the store at the platform data directory.
    pub fn open_default() -> Self {
        Self::open(default_history_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upsert an entry and persist the snapshot. On write failure the
    /// in-memory mapping keeps the change and `PersistenceFailed` is
    /// returned; memory and disk diverge until the next successful write.
    pub fn put(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.insert(entry.video_id.clone(), entry);
        self.persist()
    }

    /// All entries, most recent first.
    pub fn list(&self) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    pub fn load(&self, video_id: &str) -> Option<&HistoryEntry> {
        self.entries.get(video_id)
    }

    /// Remove one entry and persist. A missing key is a no-op, not an error.
    pub fn delete(&mut self, video_id: &str) -> Result<()> {
        if self.entries.remove(video_id).is_none() {
            return Ok(());
        }
        self.persist()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let write = || -> Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(&self.entries)?;
            std::fs::write(&self.path, json)?;
            Ok(())
        };
        write().map_err(|e| DigestError::PersistenceFailed {
            reason: e.to_string(),
        })
    }
}

pub fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("ytdigest")
        .join("history.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisData, Sentiment, SentimentLabel, SpeakerSet, Transcript};
    use tempfile::TempDir;

    fn entry(video_id: &str, timestamp: &str) -> HistoryEntry {
        HistoryEntry {
            video_id: video_id.to_string(),
            video_title: format!("YouTube Video (ID: {video_id})"),
            timestamp: timestamp.to_string(),
            data: AnalysisData {
                summary: "a summary".to_string(),
                translated_summary: "एक सारांश".to_string(),
                transcript: Transcript {
                    text: "hello".to_string(),
                    segments: vec![],
                },
                speaker_set: SpeakerSet::fallback("hello"),
                speaker_summaries: Default::default(),
                sentiment: Sentiment {
                    polarity: 0.0,
                    subjectivity: 0.0,
                    label: SentimentLabel::Neutral,
                },
                speaker_sentiment: Default::default(),
                key_points: vec!["point".to_string()],
                quotes: vec![],
                qa_pairs: vec![],
                themes: vec![],
            },
        }
    }

    fn store_in(dir: &TempDir) -> HistoryStore {
        HistoryStore::open(dir.path().join("history.json"))
    }

    #[test]
    fn put_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.put(entry("aaaaaaaaaaa", "2026-01-01 10:00:00")).unwrap();

        // Reopen from disk to prove the round trip is durable.
        let reopened = store_in(&dir);
        let loaded = reopened.load("aaaaaaaaaaa").unwrap();
        assert_eq!(loaded.video_title, "YouTube Video (ID: aaaaaaaaaaa)");
        assert_eq!(loaded.data.summary, "a summary");
        assert_eq!(loaded.data.translated_summary, "एक सारांश");
        assert_eq!(loaded.data.key_points, vec!["point".to_string()]);
    }

    #[test]
    fn put_overwrites_same_key() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.put(entry("aaaaaaaaaaa", "2026-01-01 10:00:00")).unwrap();

        let mut updated = entry("aaaaaaaaaaa", "2026-01-02 10:00:00");
        updated.data.summary = "replaced".to_string();
        store.put(updated).unwrap();

        assert_eq!(store.list().len(), 1);
        assert_eq!(store.load("aaaaaaaaaaa").unwrap().data.summary, "replaced");
    }

    #[test]
    fn list_orders_most_recent_first() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.put(entry("aaaaaaaaaaa", "2026-01-01 10:00:00")).unwrap();
        store.put(entry("bbbbbbbbbbb", "2026-01-03 10:00:00")).unwrap();
        store.put(entry("ccccccccccc", "2026-01-02 10:00:00")).unwrap();

        let ids: Vec<&str> = store.list().iter().map(|e| e.video_id.as_str()).collect();
        assert_eq!(ids, vec!["bbbbbbbbbbb", "ccccccccccc", "aaaaaaaaaaa"]);
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.put(entry("aaaaaaaaaaa", "2026-01-01 10:00:00")).unwrap();

        store.delete("aaaaaaaaaaa").unwrap();
        assert!(store.load("aaaaaaaaaaa").is_none());

        // Second delete is a no-op, not an error.
        store.delete("aaaaaaaaaaa").unwrap();
        store.delete("never-there").unwrap();
    }

    #[test]
    fn clear_empties_store_and_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.put(entry("aaaaaaaaaaa", "2026-01-01 10:00:00")).unwrap();
        store.put(entry("bbbbbbbbbbb", "2026-01-02 10:00:00")).unwrap();
        store.clear().unwrap();

        assert!(store.is_empty());
        assert!(store_in(&dir).is_empty());
    }

    #[test]
    fn missing_snapshot_opens_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).is_empty());
    }

    #[test]
    fn corrupt_snapshot_opens_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("history.json"), "not json {").unwrap();
        assert!(store_in(&dir).is_empty());
    }
}
