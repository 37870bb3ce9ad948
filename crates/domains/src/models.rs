//! # Domain Models
//!
//! These structs represent the entities the toolkit reads from and writes
//! to the remote board. Posts are immutable snapshots: the pipeline only
//! classifies and counts them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::tally::Tally;

/// Informal sentiment label, written by visitors as an emoji in their post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Emotion {
    #[serde(rename = "😍")]
    Moved,
    #[serde(rename = "😴")]
    Tired,
    #[serde(rename = "💸")]
    Pricey,
    #[serde(rename = "🤔")]
    Puzzled,
    #[serde(rename = "👍")]
    Recommended,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Moved,
        Emotion::Tired,
        Emotion::Pricey,
        Emotion::Puzzled,
        Emotion::Recommended,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Emotion::Moved => "😍",
            Emotion::Tired => "😴",
            Emotion::Pricey => "💸",
            Emotion::Puzzled => "🤔",
            Emotion::Recommended => "👍",
        }
    }

    /// Display label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Moved => "감동",
            Emotion::Tired => "피로",
            Emotion::Pricey => "비싼",
            Emotion::Puzzled => "어려움",
            Emotion::Recommended => "추천",
        }
    }

    /// Post colour used when submitting an experience with this emotion.
    pub fn color(self) -> &'static str {
        match self {
            Emotion::Moved => "red",
            Emotion::Tired => "blue",
            Emotion::Pricey => "orange",
            Emotion::Puzzled => "purple",
            Emotion::Recommended => "green",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Emotion> {
        let symbol = symbol.trim();
        Emotion::ALL.into_iter().find(|e| e.symbol() == symbol)
    }

    /// Every emotion present in `text`, in alphabet order. Presence only:
    /// repeated symbols count once.
    pub fn detect_all(text: &str) -> Vec<Emotion> {
        Emotion::ALL
            .into_iter()
            .filter(|e| text.contains(e.symbol()))
            .collect()
    }

    /// The emotion whose symbol occurs earliest in `text`.
    pub fn detect_first(text: &str) -> Option<Emotion> {
        Emotion::ALL
            .into_iter()
            .filter_map(|e| text.find(e.symbol()).map(|pos| (pos, e)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, e)| e)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One item on a board, as fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub subject: String,
    /// May contain HTML
    pub body: String,
    /// Parsed creation time, in the offset the payload carried
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Creation time exactly as the board sent it
    pub created_at_raw: Option<String>,
    pub geo: Option<GeoPoint>,
    pub location: Option<String>,
    pub color: Option<String>,
}

impl Post {
    /// Subject and body joined by a space; the text every rule looks at.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.subject, self.body)
    }

    pub fn emotions(&self) -> Vec<Emotion> {
        Emotion::detect_all(&self.full_text())
    }

    /// The post's single emotion tag, if any.
    pub fn emotion(&self) -> Option<Emotion> {
        Emotion::detect_first(&self.full_text())
    }
}

/// Derived counters over one snapshot. Recomputed on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub total_posts: usize,
    pub posts_by_location: Tally<String>,
    pub posts_by_emotion: BTreeMap<Emotion, u64>,
    pub posts_by_hour: BTreeMap<u32, u64>,
    pub trending_keywords: Vec<(String, u64)>,
    pub most_active_hour: Option<u32>,
}

impl AggregateStats {
    pub fn emotion_count(&self, emotion: Emotion) -> u64 {
        self.posts_by_emotion.get(&emotion).copied().unwrap_or(0)
    }
}

/// Why a post was queued for review.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FlagReason {
    BlockedWord { word: String },
    ExcessiveLinks { count: usize, limit: usize },
    ImplausibleLocation { latitude: f64 },
}

impl fmt::Display for FlagReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagReason::BlockedWord { word } => write!(f, "금지 단어 포함: {word}"),
            FlagReason::ExcessiveLinks { count, .. } => write!(f, "과도한 링크 포함 ({count}개)"),
            FlagReason::ImplausibleLocation { latitude } => write!(f, "남극 좌표 ({latitude})"),
        }
    }
}

/// A post matched by one or more moderation rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedPost {
    pub post_id: String,
    pub subject: String,
    pub created_at: Option<String>,
    pub reasons: Vec<FlagReason>,
}

/// What gets written to `analysis_<YYYYMMDD>.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    pub timestamp: NaiveDateTime,
    #[serde(flatten)]
    pub stats: AggregateStats,
    /// e.g. `"21시"`
    pub most_active_time: Option<String>,
    pub flagged_posts: usize,
}

/// Pin placement consumed by the board to put a post on its map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPin {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
}

/// A post to be created. Empty or absent fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub subject: String,
    pub body: String,
    pub color: Option<String>,
    pub attachment_url: Option<String>,
    pub map_pin: Option<MapPin>,
    pub section_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentRef {
    pub id: String,
}

/// Which related resources to request alongside a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardInclude {
    pub posts: bool,
    pub sections: bool,
}

impl BoardInclude {
    pub const POSTS: BoardInclude = BoardInclude {
        posts: true,
        sections: false,
    };
    pub const ALL: BoardInclude = BoardInclude {
        posts: true,
        sections: true,
    };

    /// Value of the `include` query parameter, or `None` when nothing is requested.
    pub fn query_value(self) -> Option<String> {
        let mut parts = Vec::new();
        if self.posts {
            parts.push("posts");
        }
        if self.sections {
            parts.push("sections");
        }
        (!parts.is_empty()).then(|| parts.join(","))
    }
}
