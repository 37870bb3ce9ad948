//! Event-night mode: live posts from the venue and big-screen statistics.

use chrono::{DateTime, FixedOffset};
use domains::error::AppError;
use domains::locations::{self, Location};
use domains::models::{BoardInclude, Emotion, MapPin, Post, PostDraft, PostRef};
use serde::Serialize;
use tracing::info;

use crate::extractor::extract_posts;
use crate::report::render_event_summary;
use crate::service::ArtMapService;
use crate::stats::{aggregate, share_percent};

pub const LIVE_TITLE: &str = "🎨 헤맨만큼 내 땅이다 - LIVE";
pub const LIVE_SUBJECT: &str = "🔴 LIVE: 관람객의 밤 현장";
pub const LIVE_HASHTAGS: &str = "#관람객의밤 #CSS2025 #실시간";
pub const DEFAULT_VENUE: &str = "코엑스";

const LIVE_TOP_LOCATIONS: usize = 5;
const LIVE_TRENDING: usize = 3;
/// Screen pixels per post in a location bar.
const BAR_UNIT: u64 = 10;
/// Counters on the venue screen, with the screen's own wording.
const LIVE_EMOTIONS: [(Emotion, &str); 4] = [
    (Emotion::Moved, "감동"),
    (Emotion::Recommended, "추천"),
    (Emotion::Puzzled, "고민"),
    (Emotion::Tired, "피로"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationBar {
    pub name: String,
    pub count: u64,
    pub bar_width: u64,
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionCounter {
    pub symbol: &'static str,
    pub label: &'static str,
    pub count: u64,
}

/// Display-ready numbers for the screen at the venue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveStatistics {
    pub title: String,
    /// `HH:MM:SS`
    pub update_time: String,
    pub total_posts: usize,
    /// Posts created on the same calendar day as the update.
    pub posts_today: usize,
    pub top_locations: Vec<LocationBar>,
    pub emotions: Vec<EmotionCounter>,
    pub trending_now: Vec<String>,
}

/// `now` carries the venue's offset; post times are moved into it before
/// deciding what counts as today.
pub fn live_statistics(posts: &[Post], now: DateTime<FixedOffset>) -> LiveStatistics {
    let stats = aggregate(posts);
    let located = stats.posts_by_location.total();

    let top_locations = stats
        .posts_by_location
        .most_common(LIVE_TOP_LOCATIONS)
        .into_iter()
        .map(|(name, count)| LocationBar {
            name,
            count,
            bar_width: count * BAR_UNIT,
            share_percent: share_percent(count, located),
        })
        .collect();

    let emotions = LIVE_EMOTIONS
        .into_iter()
        .map(|(e, label)| EmotionCounter {
            symbol: e.symbol(),
            label,
            count: stats.emotion_count(e),
        })
        .collect();

    let today = now.date_naive();
    let offset = now.timezone();
    let posts_today = posts
        .iter()
        .filter(|p| p.created_at.is_some_and(|at| at.with_timezone(&offset).date_naive() == today))
        .count();

    LiveStatistics {
        title: LIVE_TITLE.to_string(),
        update_time: now.format("%H:%M:%S").to_string(),
        total_posts: stats.total_posts,
        posts_today,
        top_locations,
        emotions,
        trending_now: stats
            .trending_keywords
            .into_iter()
            .take(LIVE_TRENDING)
            .map(|(word, _)| word)
            .collect(),
    }
}

/// The draft for a live message. Unknown venues fall back to the main venue.
pub fn live_event_draft(message: &str, venue: &str) -> PostDraft {
    let place: Option<&Location> = locations::resolve(venue).or_else(|| locations::find(DEFAULT_VENUE));
    PostDraft {
        subject: LIVE_SUBJECT.to_string(),
        body: format!("{message}\n\n{LIVE_HASHTAGS}"),
        color: Some("red".to_string()),
        map_pin: place.map(|loc| MapPin {
            latitude: loc.latitude,
            longitude: loc.longitude,
            location_name: format!("관람객의 밤 - {}", loc.name),
        }),
        ..Default::default()
    }
}

impl ArtMapService {
    pub async fn create_live_event_post(&self, message: &str, venue: &str) -> Result<PostRef, AppError> {
        let draft = live_event_draft(message, venue);
        let created = self.api().create_post(self.board_id(), &draft).await?;
        info!(post_id = %created.id, venue, "live event post created");
        Ok(created)
    }

    pub async fn live_statistics(&self, now: DateTime<FixedOffset>) -> Result<LiveStatistics, AppError> {
        let snapshot = self.fetch(BoardInclude::POSTS).await?;
        Ok(live_statistics(&extract_posts(&snapshot.document), now))
    }

    pub async fn event_summary(&self, now: DateTime<FixedOffset>) -> Result<String, AppError> {
        let live = self.live_statistics(now).await?;
        render_event_summary(&live)
    }
}
