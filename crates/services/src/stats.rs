//! Statistics over one snapshot's posts.

use std::collections::BTreeMap;

use chrono::Timelike;
use domains::models::{AggregateStats, Post};
use domains::tally::Tally;

/// How many of the most frequent words are considered before filtering.
pub const KEYWORD_CANDIDATES: usize = 20;
pub const KEYWORD_LIMIT: usize = 10;

/// Korean particles and verb endings that dominate raw counts.
pub const STOPWORDS: &[&str] = &[
    "있습니다", "있어요", "합니다", "해요", "이", "가", "을", "를", "의", "에", "와", "과",
];

pub fn aggregate(posts: &[Post]) -> AggregateStats {
    let mut stats = AggregateStats {
        total_posts: posts.len(),
        ..Default::default()
    };

    for post in posts {
        if let Some(label) = post.location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            stats.posts_by_location.add(label.to_string());
        }
        for emotion in post.emotions() {
            *stats.posts_by_emotion.entry(emotion).or_insert(0) += 1;
        }
        if let Some(at) = post.created_at {
            *stats.posts_by_hour.entry(at.hour()).or_insert(0) += 1;
        }
    }

    let corpus = posts.iter().map(Post::full_text).collect::<Vec<_>>().join(" ");
    stats.trending_keywords = trending_keywords(&corpus);
    stats.most_active_hour = peak_hour(&stats.posts_by_hour);
    stats
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Maximal runs of Hangul syllables, in text order.
pub fn hangul_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_hangul_syllable(c)).filter(|w| !w.is_empty())
}

/// Frequent words worth showing: the top candidates minus stopwords and
/// single-syllable words. Ties keep first-appearance order.
pub fn trending_keywords(text: &str) -> Vec<(String, u64)> {
    let tally: Tally<&str> = hangul_words(text).collect();
    tally
        .ranked()
        .into_iter()
        .take(KEYWORD_CANDIDATES)
        .map(|(word, count)| (*word, count))
        .filter(|(word, _)| !STOPWORDS.contains(word) && word.chars().count() > 1)
        .take(KEYWORD_LIMIT)
        .map(|(word, count)| (word.to_string(), count))
        .collect()
}

/// Hour with the most posts; the earliest hour wins a tie.
pub fn peak_hour(posts_by_hour: &BTreeMap<u32, u64>) -> Option<u32> {
    posts_by_hour
        .iter()
        .fold(None, |best: Option<(u32, u64)>, (&hour, &count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((hour, count)),
        })
        .map(|(hour, _)| hour)
}

/// `count / total` as a percentage, `0.0` for an empty total.
pub fn share_percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_timestamp;
    use domains::models::Emotion;

    fn post(subject: &str, body: &str, location: Option<&str>, at: Option<&str>) -> Post {
        Post {
            id: subject.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            location: location.map(str::to_string),
            created_at: at.map(|raw| parse_timestamp(raw).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_board() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_posts, 0);
        assert!(stats.posts_by_location.is_empty());
        assert!(stats.posts_by_emotion.is_empty());
        assert!(stats.trending_keywords.is_empty());
        assert_eq!(stats.most_active_hour, None);
    }

    #[test]
    fn test_locations_trimmed_and_missing_excluded() {
        let posts = [
            post("a", "", Some(" 코엑스 "), None),
            post("b", "", Some("코엑스"), None),
            post("c", "", None, None),
            post("d", "", Some("리움미술관"), None),
        ];
        let stats = aggregate(&posts);
        assert_eq!(stats.posts_by_location.get("코엑스"), 2);
        assert_eq!(stats.posts_by_location.total(), 3);
        assert_eq!(stats.total_posts, 4);
    }

    #[test]
    fn test_emotions_counted_once_per_post() {
        let posts = [post("👍👍👍", "😍", None, None), post("👍", "", None, None)];
        let stats = aggregate(&posts);
        assert_eq!(stats.emotion_count(Emotion::Recommended), 2);
        assert_eq!(stats.emotion_count(Emotion::Moved), 1);
        assert_eq!(stats.emotion_count(Emotion::Tired), 0);
    }

    #[test]
    fn test_hours_and_peak_prefers_earliest_tie() {
        let posts = [
            post("a", "", None, Some("2025-09-04T21:00:00Z")),
            post("b", "", None, Some("2025-09-04T14:10:00Z")),
            post("c", "", None, Some("2025-09-04T21:30:00Z")),
            post("d", "", None, Some("2025-09-04T14:50:00Z")),
            post("e", "", None, None),
        ];
        let stats = aggregate(&posts);
        assert_eq!(stats.posts_by_hour.get(&21), Some(&2));
        assert_eq!(stats.posts_by_hour.values().sum::<u64>(), 4);
        assert_eq!(stats.most_active_hour, Some(14));
    }

    #[test]
    fn test_keywords_filter_stopwords_and_single_syllables() {
        let text = "전시 전시 전시 작품 작품 이 이 이 이 해요 해요 좋은 A 전시!";
        let keywords = trending_keywords(text);
        assert_eq!(
            keywords,
            vec![("전시".to_string(), 4), ("작품".to_string(), 2), ("좋은".to_string(), 1)]
        );
    }

    #[test]
    fn test_keywords_split_on_non_hangul() {
        let words: Vec<_> = hangul_words("<p>갤러리</p>투어abc전시😍작품").collect();
        assert_eq!(words, vec!["갤러리", "투어", "전시", "작품"]);
    }

    #[test]
    fn test_keywords_limit() {
        let text: String = (0..30)
            .map(|i| format!("단어{} ", char::from_u32(0xAC00 + i).unwrap()))
            .collect();
        assert_eq!(trending_keywords(&text).len(), KEYWORD_LIMIT);
    }

    #[test]
    fn test_keywords_filtered_after_candidate_cut() {
        let syllable = |base: u32, i: u32| char::from_u32(base + i).unwrap();
        let mut text = String::new();
        for i in 0..15 {
            let single = syllable(0xB000, i);
            text.push_str(&format!("{single} {single} {single} "));
        }
        let words: Vec<String> = (0..15).map(|i| format!("전시{}", syllable(0xAC00, i))).collect();
        text.push_str(&words.join(" "));

        let keywords = trending_keywords(&text);
        let expected: Vec<(String, u64)> = words.iter().take(5).map(|w| (w.clone(), 1)).collect();
        assert_eq!(keywords, expected);
        assert!(keywords.len() < KEYWORD_LIMIT);
    }

    #[test]
    fn test_share_percent_guarded() {
        assert_eq!(share_percent(3, 0), 0.0);
        assert_eq!(share_percent(1, 4), 25.0);
    }
}
