//! Visitor submissions: experience posts pinned at a known venue, and tip
//! comments under existing posts.

use chrono::NaiveDateTime;
use domains::error::AppError;
use domains::locations;
use domains::models::{CommentRef, Emotion, MapPin, PostDraft, PostRef};
use tracing::{info, warn};

use crate::service::ArtMapService;

/// One visitor experience, as entered.
#[derive(Debug, Clone, PartialEq)]
pub struct Experience {
    /// Venue name or alias, resolved against the location table
    pub location: String,
    pub title: String,
    pub text: String,
    pub emotion: Emotion,
    pub image_url: Option<String>,
}

pub fn experience_draft(experience: &Experience, now: NaiveDateTime) -> Result<PostDraft, AppError> {
    let place = locations::resolve(&experience.location)
        .ok_or_else(|| AppError::UnknownLocation(experience.location.clone()))?;

    Ok(PostDraft {
        subject: format!("{} {}", experience.emotion.symbol(), experience.title),
        body: format!(
            "{}\n\n📍 {}\n🕐 {}",
            experience.text,
            place.display_name,
            now.format("%Y-%m-%d %H:%M")
        ),
        color: Some(experience.emotion.color().to_string()),
        attachment_url: experience.image_url.clone().filter(|url| !url.trim().is_empty()),
        map_pin: Some(MapPin {
            latitude: place.latitude,
            longitude: place.longitude,
            location_name: place.display_name.to_string(),
        }),
        section_id: None,
    })
}

/// Escapes a tip for use as comment HTML; line breaks become `<br />`.
pub fn tip_html(tip: &str) -> String {
    let escaped = html_escape::encode_safe(tip.trim()).to_string();
    format!("<p>{}</p>", escaped.lines().collect::<Vec<_>>().join("<br />"))
}

impl ArtMapService {
    pub async fn post_visitor_experience(&self, experience: &Experience, now: NaiveDateTime) -> Result<PostRef, AppError> {
        let draft = experience_draft(experience, now)?;
        let created = self.api().create_post(self.board_id(), &draft).await?;
        info!(post_id = %created.id, location = %experience.location, "experience posted");
        Ok(created)
    }

    /// Posts each experience in turn; one failure does not stop the rest.
    pub async fn post_visitor_experiences(
        &self,
        experiences: &[Experience],
        now: NaiveDateTime,
    ) -> Vec<Result<PostRef, AppError>> {
        let mut results = Vec::with_capacity(experiences.len());
        for experience in experiences {
            let result = self.post_visitor_experience(experience, now).await;
            if let Err(err) = &result {
                warn!(title = %experience.title, error = %err, "experience not posted");
            }
            results.push(result);
        }
        results
    }

    pub async fn add_tip_comment(&self, post_id: &str, tip: &str) -> Result<CommentRef, AppError> {
        let created = self.api().create_comment(post_id, &tip_html(tip)).await?;
        info!(post_id, comment_id = %created.id, "tip comment added");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use domains::error::ApiError;
    use domains::ports::{MockBoardApi, MockSnapshotStore};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 3).unwrap().and_hms_opt(14, 7, 0).unwrap()
    }

    fn experience(location: &str) -> Experience {
        Experience {
            location: location.into(),
            title: "인생 작품".into(),
            text: "한참 서 있었어요".into(),
            emotion: Emotion::Moved,
            image_url: Some(" ".into()),
        }
    }

    #[test]
    fn test_experience_draft_fields() {
        let draft = experience_draft(&experience("coex"), now()).unwrap();
        assert_eq!(draft.subject, "😍 인생 작품");
        assert_eq!(draft.color.as_deref(), Some("red"));
        assert!(draft.body.starts_with("한참 서 있었어요\n\n📍 "));
        assert!(draft.body.ends_with("\n🕐 2025-09-03 14:07"));
        assert_eq!(draft.attachment_url, None);
        let pin = draft.map_pin.unwrap();
        assert!(draft.body.contains(&format!("📍 {}", pin.location_name)));
    }

    #[test]
    fn test_unknown_location_is_an_error() {
        let err = experience_draft(&experience("부산 해운대"), now()).unwrap_err();
        assert!(matches!(err, AppError::UnknownLocation(ref name) if name == "부산 해운대"));
    }

    #[test]
    fn test_tip_html_escapes() {
        insta::assert_snapshot!(tip_html("<b>편한 신발\n필수!"), @"<p>&lt;b&gt;편한 신발<br />필수!</p>");
    }

    #[test]
    fn test_post_visitor_experience_sends_draft() {
        let mut api = MockBoardApi::new();
        api.expect_create_post()
            .withf(|board_id, draft| board_id == "b1" && draft.subject == "😍 인생 작품")
            .times(1)
            .returning(|_, _| Ok(PostRef { id: "p9".into() }));
        let svc = ArtMapService::new(Arc::new(api), Arc::new(MockSnapshotStore::new()), "b1");

        let created = tokio_test::block_on(svc.post_visitor_experience(&experience("프리즈"), now())).unwrap();
        assert_eq!(created.id, "p9");
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let mut api = MockBoardApi::new();
        api.expect_create_post()
            .times(1)
            .returning(|_, _| Err(ApiError::Status { status: 403, message: "forbidden".into() }));
        let svc = ArtMapService::new(Arc::new(api), Arc::new(MockSnapshotStore::new()), "b1");

        let batch = [experience("어딘지 모를 곳"), experience("coex")];
        let results = tokio_test::block_on(svc.post_visitor_experiences(&batch, now()));
        assert!(matches!(results[0], Err(AppError::UnknownLocation(_))));
        assert!(matches!(&results[1], Err(AppError::Api(e)) if e.hint().is_some()));
    }

    #[test]
    fn test_add_tip_comment_wraps_html() {
        let mut api = MockBoardApi::new();
        api.expect_create_comment()
            .withf(|post_id, html| post_id == "p1" && html == "<p>오전에 가세요</p>")
            .times(1)
            .returning(|_, _| Ok(CommentRef { id: "c1".into() }));
        let svc = ArtMapService::new(Arc::new(api), Arc::new(MockSnapshotStore::new()), "b1");

        assert_eq!(tokio_test::block_on(svc.add_tip_comment("p1", " 오전에 가세요 ")).unwrap().id, "c1");
    }
}
