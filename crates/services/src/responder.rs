//! Beginner-question detection for the auto-responder.

use std::collections::HashSet;

use domains::models::Post;

/// Phrases first-time visitors use when asking where to start.
pub const QUESTION_MARKERS: &[&str] = &["처음", "초보", "어디부터", "모르겠", "도와"];

pub const HELP_COMMENT: &str = "<p>안녕하세요! 처음 오신 분을 위한 팁을 드릴게요 😊</p>\
<ul>\
<li>평일 오전이 가장 한가합니다</li>\
<li>프리즈는 코엑스, 키아프는 같은 장소입니다</li>\
<li>삼청동 작은 갤러리들도 놓치지 마세요</li>\
<li>편한 신발은 필수입니다!</li>\
</ul>\
<p>즐거운 관람 되세요! 🎨</p>";

pub fn is_beginner_question(post: &Post) -> bool {
    QUESTION_MARKERS.iter().any(|marker| post.body.contains(marker))
}

/// Questions not answered yet, in board order.
pub fn pending_questions<'a>(posts: &'a [Post], answered: &HashSet<String>) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| is_beginner_question(p) && !answered.contains(&p.id))
        .collect()
}

/// What one auto-respond pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RespondOutcome {
    /// Unanswered questions seen this pass
    pub detected: Vec<String>,
    /// Subset that received a help comment
    pub commented: Vec<String>,
}
