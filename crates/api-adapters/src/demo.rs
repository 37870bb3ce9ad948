//! Offline board used when no API key is configured. Reads come from a
//! bundled sample document; writes are logged and acknowledged with
//! synthetic ids but never leave the process.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use domains::document::BoardSnapshot;
use domains::error::ApiError;
use domains::models::{BoardInclude, CommentRef, PostDraft, PostRef};
use domains::ports::BoardApi;
use serde_json::Value;
use tracing::info;

const DEMO_BOARD: &str = include_str!("../fixtures/demo_board.json");

#[derive(Debug, Default)]
pub struct DemoBoard {
    writes: AtomicUsize,
}

impl DemoBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes acknowledged so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    fn next_id(&self, kind: &str) -> String {
        let n = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        format!("demo-{kind}-{n}")
    }
}

fn requested(kind: &str, include: BoardInclude) -> bool {
    match kind {
        "post" => include.posts,
        "section" => include.sections,
        _ => true,
    }
}

#[async_trait]
impl BoardApi for DemoBoard {
    async fn fetch_board(&self, _board_id: &str, include: BoardInclude) -> Result<BoardSnapshot, ApiError> {
        let mut raw: Value = serde_json::from_str(DEMO_BOARD).map_err(|e| ApiError::Decode(e.to_string()))?;
        if let Some(included) = raw.get_mut("included").and_then(Value::as_array_mut) {
            included.retain(|entry| requested(entry.get("type").and_then(Value::as_str).unwrap_or_default(), include));
        }
        BoardSnapshot::from_value(raw).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create_post(&self, board_id: &str, draft: &PostDraft) -> Result<PostRef, ApiError> {
        let id = self.next_id("post");
        info!(board_id, post_id = %id, subject = %draft.subject, "demo mode: post not sent");
        Ok(PostRef { id })
    }

    async fn create_comment(&self, post_id: &str, html_content: &str) -> Result<CommentRef, ApiError> {
        let id = self.next_id("comment");
        info!(post_id, comment_id = %id, bytes = html_content.len(), "demo mode: comment not sent");
        Ok(CommentRef { id })
    }
}
