//! Operator-facing output on stdout. Structured logs go to stderr through
//! tracing; these lines are the human summary.

use domains::error::AppError;
use domains::models::{AnalysisRecord, FlaggedPost};
use services::RespondOutcome;

const PREVIEW_CHARS: usize = 30;

pub fn success(message: impl AsRef<str>) {
    println!("✅ {}", message.as_ref());
}

pub fn warning(message: impl AsRef<str>) {
    println!("⚠️ {}", message.as_ref());
}

pub fn failure(context: &str, err: &AppError) {
    println!("❌ {context}: {err}");
    if let AppError::Api(api) = err {
        if let Some(hint) = api.hint() {
            println!("   → {hint}");
        }
    }
}

/// First `PREVIEW_CHARS` characters, with an ellipsis when cut.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

pub fn analysis(record: &AnalysisRecord) {
    let stats = &record.stats;
    let top: Vec<String> = stats
        .posts_by_location
        .most_common(3)
        .into_iter()
        .map(|(name, count)| format!("{name} {count}"))
        .collect();
    let emotions: Vec<String> = stats
        .posts_by_emotion
        .iter()
        .map(|(emotion, count)| format!("{emotion} {count}"))
        .collect();
    let keywords: Vec<&str> = stats.trending_keywords.iter().take(5).map(|(w, _)| w.as_str()).collect();

    success("분석 완료:");
    println!("  - 총 게시물: {}", stats.total_posts);
    println!("  - 인기 장소: {}", top.join(", "));
    println!("  - 주요 감정: {}", emotions.join(", "));
    println!("  - 트렌딩 키워드: {}", keywords.join(", "));
    println!("  - 가장 활발한 시간: {}", record.most_active_time.as_deref().unwrap_or("N/A"));
}

pub fn flagged(posts: &[FlaggedPost]) {
    if posts.is_empty() {
        success("모든 콘텐츠 정상");
        return;
    }
    warning(format!("검토 필요 게시물 {}개 발견", posts.len()));
    for post in posts {
        let reasons: Vec<String> = post.reasons.iter().map(ToString::to_string).collect();
        println!("  - {} ({})", preview(&post.subject), reasons.join(", "));
    }
}

pub fn responded(outcome: &RespondOutcome) {
    for id in &outcome.detected {
        let action = if outcome.commented.contains(id) { "도움말 댓글 작성" } else { "감지" };
        println!("  ℹ️ 초보자 질문 {action}: {id}");
    }
}
