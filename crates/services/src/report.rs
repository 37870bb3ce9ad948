//! Plain-text reports rendered through askama templates under `templates/`.

use askama::Template;
use chrono::NaiveDate;
use domains::error::AppError;
use domains::models::{AggregateStats, AnalysisRecord};

use crate::event_day::LiveStatistics;

pub const REPORT_TOP_LOCATIONS: usize = 3;
pub const REPORT_TOP_KEYWORDS: usize = 5;

struct RankedLine {
    rank: usize,
    name: String,
    count: u64,
}

struct CountLine {
    name: String,
    count: u64,
}

struct EmotionLine {
    symbol: &'static str,
    label: &'static str,
    count: u64,
}

#[derive(Template)]
#[template(path = "daily_report.txt")]
struct DailyReportTemplate<'a> {
    date: String,
    total_posts: usize,
    most_active_time: &'a str,
    top_locations: Vec<RankedLine>,
    emotions: Vec<EmotionLine>,
    keywords: Vec<CountLine>,
}

#[derive(Template)]
#[template(path = "event_summary.txt")]
struct EventSummaryTemplate<'a> {
    total_posts: usize,
    posts_today: usize,
    top_location: &'a str,
    emotions: Vec<EmotionLine>,
    keywords: String,
}

/// `"21시"` for hour 21.
pub fn hour_label(hour: u32) -> String {
    format!("{hour}시")
}

/// Korean long date, e.g. `2025년 09월 04일`.
pub fn report_date(day: NaiveDate) -> String {
    day.format("%Y년 %m월 %d일").to_string()
}

pub fn render_daily_report(record: &AnalysisRecord, day: NaiveDate) -> Result<String, AppError> {
    let stats: &AggregateStats = &record.stats;

    let top_locations = stats
        .posts_by_location
        .most_common(REPORT_TOP_LOCATIONS)
        .into_iter()
        .enumerate()
        .map(|(i, (name, count))| RankedLine { rank: i + 1, name, count })
        .collect();

    let emotions = stats
        .posts_by_emotion
        .iter()
        .map(|(emotion, &count)| EmotionLine {
            symbol: emotion.symbol(),
            label: emotion.label(),
            count,
        })
        .collect();

    let keywords = stats
        .trending_keywords
        .iter()
        .take(REPORT_TOP_KEYWORDS)
        .map(|(name, count)| CountLine {
            name: name.clone(),
            count: *count,
        })
        .collect();

    DailyReportTemplate {
        date: report_date(day),
        total_posts: stats.total_posts,
        most_active_time: record.most_active_time.as_deref().unwrap_or("N/A"),
        top_locations,
        emotions,
        keywords,
    }
    .render()
    .map_err(|e| AppError::Render(e.to_string()))
}

/// Summary shown after the event, built from the live statistics.
pub fn render_event_summary(live: &LiveStatistics) -> Result<String, AppError> {
    let emotions = live
        .emotions
        .iter()
        .take(3)
        .map(|e| EmotionLine {
            symbol: e.symbol,
            label: e.label,
            count: e.count,
        })
        .collect();

    EventSummaryTemplate {
        total_posts: live.total_posts,
        posts_today: live.posts_today,
        top_location: live.top_locations.first().map_or("N/A", |l| l.name.as_str()),
        emotions,
        keywords: live.trending_now.join(", "),
    }
    .render()
    .map_err(|e| AppError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domains::models::Emotion;

    fn record() -> AnalysisRecord {
        let mut stats = AggregateStats {
            total_posts: 7,
            ..Default::default()
        };
        for (name, n) in [("삼청동", 1), ("코엑스", 4), ("리움미술관", 2), ("한남동", 2)] {
            stats.posts_by_location.add_n(name.to_string(), n);
        }
        stats.posts_by_emotion.insert(Emotion::Recommended, 3);
        stats.posts_by_emotion.insert(Emotion::Tired, 1);
        stats.trending_keywords = ["전시", "작품", "갤러리", "도슨트", "프리즈", "키아프"]
            .iter()
            .map(|w| (w.to_string(), 2))
            .collect();
        AnalysisRecord {
            timestamp: NaiveDate::from_ymd_opt(2025, 9, 4).unwrap().and_hms_opt(21, 0, 0).unwrap(),
            stats,
            most_active_time: Some(hour_label(21)),
            flagged_posts: 0,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 4).unwrap()
    }

    #[test]
    fn test_report_date_format() {
        insta::assert_snapshot!(report_date(day()), @"2025년 09월 04일");
    }

    #[test]
    fn test_daily_report_sections() {
        let text = render_daily_report(&record(), day()).unwrap();
        assert!(text.starts_with("========================================\n🎨 헤맨만큼 내 땅이다 - 일일 리포트"));
        assert!(text.contains("날짜: 2025년 09월 04일"));
        assert!(text.contains("• 총 게시물 수: 7개"));
        assert!(text.contains("• 가장 활발한 시간: 21시"));
        assert!(text.contains("-----------------\n1. 코엑스: 4개 게시물\n2. 리움미술관: 2개 게시물\n3. 한남동: 2개 게시물\n\n"));
        assert!(!text.contains("삼청동"));
        assert!(text.contains("• 😴 피로: 1개\n• 👍 추천: 3개"));
        assert!(text.contains("• 프리즈 (2회)"));
        assert!(!text.contains("키아프"));
    }

    #[test]
    fn test_daily_report_empty_board() {
        let record = AnalysisRecord {
            stats: AggregateStats::default(),
            most_active_time: None,
            ..record()
        };
        let text = render_daily_report(&record, day()).unwrap();
        assert!(text.contains("• 총 게시물 수: 0개"));
        assert!(text.contains("• 가장 활발한 시간: N/A"));
        assert!(text.contains("🏆 인기 장소 TOP 3\n-----------------\n\n😊 감정 분포"));
    }

    #[test]
    fn test_hour_label() {
        insta::assert_snapshot!(hour_label(9), @"9시");
    }
}
