//! # Local snapshot store
//! Writes backups, analyses and reports as dated files under one data
//! directory, created on first write.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use domains::error::StorageError;
use domains::models::AnalysisRecord;
use domains::ports::SnapshotStore;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

pub struct LocalSnapshotStore {
    /// Root directory for all artifacts (e.g. "./css_art_map_data")
    root_path: PathBuf,
}

impl LocalSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root_path: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    async fn write(&self, file_name: String, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(&self.root_path).await?;
        let target = self.root_path.join(file_name);
        fs::write(&target, bytes).await?;
        debug!(path = %target.display(), bytes = bytes.len(), "artifact written");
        Ok(target)
    }
}

pub fn backup_file_name(taken_at: NaiveDateTime) -> String {
    format!("backup_{}.json", taken_at.format("%Y%m%d_%H%M%S"))
}

pub fn analysis_file_name(day: NaiveDate) -> String {
    format!("analysis_{}.json", day.format("%Y%m%d"))
}

pub fn report_file_name(day: NaiveDate) -> String {
    format!("daily_report_{}.txt", day.format("%Y%m%d"))
}

#[async_trait]
impl SnapshotStore for LocalSnapshotStore {
    async fn save_backup(&self, raw: &Value, taken_at: NaiveDateTime) -> Result<PathBuf, StorageError> {
        let bytes = serde_json::to_vec_pretty(raw)?;
        self.write(backup_file_name(taken_at), &bytes).await
    }

    /// Rewrites the day's file; the last analysis of a day wins.
    async fn save_analysis(&self, record: &AnalysisRecord, day: NaiveDate) -> Result<PathBuf, StorageError> {
        let bytes = serde_json::to_vec_pretty(record)?;
        self.write(analysis_file_name(day), &bytes).await
    }

    async fn save_report(&self, text: &str, day: NaiveDate) -> Result<PathBuf, StorageError> {
        self.write(report_file_name(day), text.as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domains::models::{AggregateStats, Emotion};
    use serde_json::json;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 4).unwrap().and_hms_opt(9, 5, 7).unwrap()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(backup_file_name(at()), "backup_20250904_090507.json");
        assert_eq!(analysis_file_name(at().date()), "analysis_20250904.json");
        assert_eq!(report_file_name(at().date()), "daily_report_20250904.txt");
    }

    #[tokio::test]
    async fn test_backup_creates_directory_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path().join("nested/data"));
        let raw = json!({ "included": [{ "id": "p1", "type": "post", "attributes": { "content": { "subject": "삼청동 😍" } } }] });

        let path = store.save_backup(&raw, at()).await.unwrap();
        assert_eq!(path, dir.path().join("nested/data/backup_20250904_090507.json"));
        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.contains("삼청동 😍"));
        assert!(text.contains("\n  \"included\""));
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, raw);
    }

    #[tokio::test]
    async fn test_analysis_same_day_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path());
        let mut record = AnalysisRecord {
            timestamp: at(),
            stats: AggregateStats::default(),
            most_active_time: None,
            flagged_posts: 0,
        };
        store.save_analysis(&record, at().date()).await.unwrap();
        record.stats.total_posts = 3;
        record.stats.posts_by_emotion.insert(Emotion::Moved, 2);
        let path = store.save_analysis(&record, at().date()).await.unwrap();

        let saved: Value = serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(saved["total_posts"], 3);
        assert_eq!(saved["posts_by_emotion"]["😍"], 2);
        assert_eq!(saved["timestamp"], "2025-09-04T09:05:07");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_report_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path());
        let path = store.save_report("리포트\n", at().date()).await.unwrap();
        assert_eq!(tokio::fs::read_to_string(path).await.unwrap(), "리포트\n");
    }

    #[tokio::test]
    async fn test_unwritable_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let store = LocalSnapshotStore::new(blocker.join("data"));
        let err = store.save_report("x", at().date()).await.unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
