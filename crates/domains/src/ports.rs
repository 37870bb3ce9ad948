//! # Core Traits (Ports)
//!
//! Adapters implement these traits; services only ever see the trait
//! objects.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::document::BoardSnapshot;
use crate::error::{ApiError, StorageError};
use crate::models::{AnalysisRecord, BoardInclude, CommentRef, PostDraft, PostRef};

/// Remote board contract. Every method returns failures as values.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Fetches a board together with the requested related resources.
    async fn fetch_board(&self, board_id: &str, include: BoardInclude) -> Result<BoardSnapshot, ApiError>;

    /// Creates a post; `draft.map_pin` places it on the board's map.
    async fn create_post(&self, board_id: &str, draft: &PostDraft) -> Result<PostRef, ApiError>;

    /// Creates a comment with HTML content under an existing post.
    async fn create_comment(&self, post_id: &str, html_content: &str) -> Result<CommentRef, ApiError>;
}

/// Dated, write-once persistence for snapshots and derived artifacts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Writes the raw board document as `backup_<YYYYMMDD_HHMMSS>.json`.
    async fn save_backup(&self, raw: &serde_json::Value, taken_at: NaiveDateTime) -> Result<PathBuf, StorageError>;

    /// Writes `analysis_<YYYYMMDD>.json`.
    async fn save_analysis(&self, record: &AnalysisRecord, day: NaiveDate) -> Result<PathBuf, StorageError>;

    /// Writes `daily_report_<YYYYMMDD>.txt`.
    async fn save_report(&self, text: &str, day: NaiveDate) -> Result<PathBuf, StorageError>;
}
