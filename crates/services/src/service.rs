//! The pipeline façade the binary drives: one method per job, each on a
//! fresh snapshot of the board.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use domains::document::BoardSnapshot;
use domains::error::AppError;
use domains::models::{AnalysisRecord, BoardInclude, FlaggedPost, Post};
use domains::ports::{BoardApi, SnapshotStore};
use tracing::{info, warn};

use crate::extractor::extract_posts;
use crate::moderation::ModerationPolicy;
use crate::report::{hour_label, render_daily_report};
use crate::responder::{pending_questions, RespondOutcome, HELP_COMMENT};
use crate::stats::aggregate;

/// A rendered daily report and where it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReport {
    pub text: String,
    pub path: PathBuf,
}

pub struct ArtMapService {
    api: Arc<dyn BoardApi>,
    store: Arc<dyn SnapshotStore>,
    board_id: String,
    policy: ModerationPolicy,
    post_help_comments: bool,
}

impl ArtMapService {
    pub fn new(api: Arc<dyn BoardApi>, store: Arc<dyn SnapshotStore>, board_id: impl Into<String>) -> Self {
        Self {
            api,
            store,
            board_id: board_id.into(),
            policy: ModerationPolicy::default(),
            post_help_comments: false,
        }
    }

    pub fn with_policy(mut self, policy: ModerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// When disabled, the auto-responder only reports questions it finds.
    pub fn with_help_comments(mut self, enabled: bool) -> Self {
        self.post_help_comments = enabled;
        self
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    pub fn policy(&self) -> &ModerationPolicy {
        &self.policy
    }

    pub(crate) fn api(&self) -> &dyn BoardApi {
        self.api.as_ref()
    }

    pub(crate) async fn fetch(&self, include: BoardInclude) -> Result<BoardSnapshot, AppError> {
        self.api
            .fetch_board(&self.board_id, include)
            .await
            .map_err(|err| {
                warn!(board_id = %self.board_id, error = %err, hint = err.hint(), "board fetch failed");
                AppError::from(err)
            })
    }

    async fn posts(&self) -> Result<Vec<Post>, AppError> {
        let snapshot = self.fetch(BoardInclude::POSTS).await?;
        Ok(extract_posts(&snapshot.document))
    }

    /// Saves the full board document, posts and sections included.
    pub async fn backup(&self, now: NaiveDateTime) -> Result<PathBuf, AppError> {
        let snapshot = self.fetch(BoardInclude::ALL).await?;
        let path = self.store.save_backup(&snapshot.raw, now).await?;
        info!(path = %path.display(), entries = snapshot.document.included.len(), "backup written");
        Ok(path)
    }

    /// Computes the statistics for the current board and stores them as
    /// the day's analysis file.
    pub async fn analyze(&self, now: NaiveDateTime) -> Result<AnalysisRecord, AppError> {
        let posts = self.posts().await?;
        let record = analysis_record(&posts, &self.policy, now);
        let path = self.store.save_analysis(&record, now.date()).await?;
        info!(
            path = %path.display(),
            total_posts = record.stats.total_posts,
            flagged = record.flagged_posts,
            "analysis written"
        );
        Ok(record)
    }

    pub async fn moderate(&self) -> Result<Vec<FlaggedPost>, AppError> {
        let posts = self.posts().await?;
        let flagged = self.policy.review(&posts);
        for post in &flagged {
            let reasons: Vec<String> = post.reasons.iter().map(ToString::to_string).collect();
            warn!(post_id = %post.post_id, reasons = ?reasons, "post needs review");
        }
        info!(checked = posts.len(), flagged = flagged.len(), "moderation pass finished");
        Ok(flagged)
    }

    /// Runs an analysis, then renders and stores the day's report.
    pub async fn daily_report(&self, now: NaiveDateTime) -> Result<DailyReport, AppError> {
        let record = self.analyze(now).await?;
        let text = render_daily_report(&record, now.date())?;
        let path = self.store.save_report(&text, now.date()).await?;
        info!(path = %path.display(), "daily report written");
        Ok(DailyReport { text, path })
    }

    /// Finds beginner questions not in `answered`. With help comments
    /// enabled, comments on each and records it in `answered`; a failed
    /// comment is retried on the next pass.
    pub async fn auto_respond(&self, answered: &mut HashSet<String>) -> Result<RespondOutcome, AppError> {
        let posts = self.posts().await?;
        let mut outcome = RespondOutcome::default();

        for post in pending_questions(&posts, answered) {
            info!(post_id = %post.id, subject = %post.subject, "beginner question detected");
            outcome.detected.push(post.id.clone());
            if !self.post_help_comments {
                continue;
            }
            match self.api.create_comment(&post.id, HELP_COMMENT).await {
                Ok(comment) => {
                    info!(post_id = %post.id, comment_id = %comment.id, "help comment posted");
                    outcome.commented.push(post.id.clone());
                }
                Err(err) => warn!(post_id = %post.id, error = %err, "help comment failed"),
            }
        }

        answered.extend(outcome.commented.iter().cloned());
        Ok(outcome)
    }
}

/// Analysis of one snapshot's posts at `now`.
pub fn analysis_record(posts: &[Post], policy: &ModerationPolicy, now: NaiveDateTime) -> AnalysisRecord {
    let stats = aggregate(posts);
    AnalysisRecord {
        timestamp: now,
        most_active_time: stats.most_active_hour.map(hour_label),
        flagged_posts: policy.review(posts).len(),
        stats,
    }
}
