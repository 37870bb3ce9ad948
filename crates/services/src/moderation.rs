//! Rule-based review queue. Rules only flag; nothing is ever deleted.

use std::ops::RangeInclusive;

use domains::models::{FlagReason, FlaggedPost, Post};

pub const DEFAULT_BLOCKED_WORDS: &[&str] = &["광고", "홍보", "판매", "할인"];
pub const DEFAULT_MAX_LINKS: usize = 3;

/// Latitudes no visitor of a Seoul art week is plausibly posting from.
const ANTARCTICA: RangeInclusive<f64> = -90.0..=-75.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ModerationPolicy {
    pub blocked_words: Vec<String>,
    /// A post may contain at most this many links.
    pub max_links: usize,
    pub flag_antarctica: bool,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            blocked_words: DEFAULT_BLOCKED_WORDS.iter().map(|w| w.to_string()).collect(),
            max_links: DEFAULT_MAX_LINKS,
            flag_antarctica: true,
        }
    }
}

impl ModerationPolicy {
    /// Every rule `post` breaks, in rule order. Empty means the post is clean.
    pub fn check(&self, post: &Post) -> Vec<FlagReason> {
        let text = post.full_text().to_lowercase();
        let mut reasons = Vec::new();

        if let Some(word) = self
            .blocked_words
            .iter()
            .find(|w| !w.is_empty() && text.contains(&w.to_lowercase()))
        {
            reasons.push(FlagReason::BlockedWord { word: word.clone() });
        }

        let links = count_links(&text);
        if links > self.max_links {
            reasons.push(FlagReason::ExcessiveLinks {
                count: links,
                limit: self.max_links,
            });
        }

        if self.flag_antarctica {
            if let Some(geo) = post.geo.filter(|g| ANTARCTICA.contains(&g.latitude)) {
                reasons.push(FlagReason::ImplausibleLocation { latitude: geo.latitude });
            }
        }

        reasons
    }

    /// Flagged posts in input order, one entry per post.
    pub fn review(&self, posts: &[Post]) -> Vec<FlaggedPost> {
        posts
            .iter()
            .filter_map(|post| {
                let reasons = self.check(post);
                (!reasons.is_empty()).then(|| FlaggedPost {
                    post_id: post.id.clone(),
                    subject: post.subject.clone(),
                    created_at: post.created_at_raw.clone(),
                    reasons,
                })
            })
            .collect()
    }
}

/// Occurrences of `http`, case-insensitive. Counts `https` too.
pub fn count_links(text: &str) -> usize {
    text.to_lowercase().matches("http").count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::models::GeoPoint;

    fn post(subject: &str, body: &str) -> Post {
        Post {
            id: "p".into(),
            subject: subject.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    fn links(n: usize) -> String {
        (0..n).map(|i| format!("https://a.example/{i} ")).collect()
    }

    #[test]
    fn test_link_limit_boundary() {
        let policy = ModerationPolicy::default();
        assert!(policy.check(&post("", &links(3))).is_empty());
        assert_eq!(
            policy.check(&post("", &links(4))),
            vec![FlagReason::ExcessiveLinks { count: 4, limit: 3 }]
        );
    }

    #[test]
    fn test_first_blocked_word_in_list_order() {
        let policy = ModerationPolicy::default();
        let reasons = policy.check(&post("공식 홍보 할인!", ""));
        assert_eq!(reasons, vec![FlagReason::BlockedWord { word: "홍보".into() }]);
        assert_eq!(reasons[0].to_string(), "금지 단어 포함: 홍보");
    }

    #[test]
    fn test_blocked_word_case_insensitive() {
        let policy = ModerationPolicy {
            blocked_words: vec!["SALE".into()],
            ..Default::default()
        };
        assert_eq!(policy.check(&post("big sale", "")).len(), 1);
        assert!(policy.check(&post("salt", "")).is_empty());
    }

    #[test]
    fn test_reasons_accumulate_per_post() {
        let policy = ModerationPolicy::default();
        let mut spam = post("광고", &links(5));
        spam.geo = Some(GeoPoint { latitude: -80.0, longitude: 0.0 });
        let flagged = policy.review(&[post("clean", ""), spam]);
        assert_eq!(flagged.len(), 1);
        let rules: Vec<_> = flagged[0].reasons.iter().map(ToString::to_string).collect();
        assert_eq!(rules, vec!["금지 단어 포함: 광고", "과도한 링크 포함 (5개)", "남극 좌표 (-80)"]);
    }

    #[test]
    fn test_antarctica_rule_can_be_disabled() {
        let mut far = post("", "");
        far.geo = Some(GeoPoint { latitude: -75.0, longitude: 10.0 });
        assert_eq!(ModerationPolicy::default().check(&far).len(), 1);
        let lenient = ModerationPolicy {
            flag_antarctica: false,
            ..Default::default()
        };
        assert!(lenient.check(&far).is_empty());
        far.geo = Some(GeoPoint { latitude: -74.9, longitude: 10.0 });
        assert!(ModerationPolicy::default().check(&far).is_empty());
    }

    #[test]
    fn test_count_links_case_insensitive() {
        assert_eq!(count_links("HTTP://a https://b http"), 3);
        assert_eq!(count_links("no links"), 0);
    }
}
