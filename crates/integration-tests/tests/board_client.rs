//! The real reqwest client against the fake board service.

use std::time::Duration;

use api_adapters::{PadletClient, RetryConfig};
use domains::error::ApiError;
use domains::models::{BoardInclude, MapPin, PostDraft};
use domains::ports::BoardApi;
use integration_tests::fake_board::{FakeBoard, FAKE_API_KEY};
use integration_tests::{board_document, post, section, TEST_BOARD_ID};
use secrecy::SecretString;

fn quick_retry() -> RetryConfig {
    RetryConfig::default()
        .max_retries(3)
        .initial_delay(Duration::from_millis(5))
        .jitter(false)
}

fn client(base_url: &str, key: &str) -> PadletClient {
    PadletClient::new(base_url, SecretString::from(key.to_string()), Duration::from_secs(5))
        .unwrap()
        .with_retry(quick_retry())
}

fn fake() -> FakeBoard {
    FakeBoard::new(board_document(vec![
        section("s1"),
        post("p1", "😍 첫 관람", "<p>좋아요</p>", Some("코엑스")),
        post("p2", "👍", "", None),
    ]))
}

#[tokio::test]
async fn fetch_sends_key_headers_and_include() {
    let fake = fake();
    let base = fake.spawn().await.unwrap();

    let snapshot = client(&base, FAKE_API_KEY)
        .fetch_board(TEST_BOARD_ID, BoardInclude::ALL)
        .await
        .unwrap();

    assert_eq!(snapshot.title(), Some("test board"));
    assert_eq!(snapshot.document.included.len(), 3);
    let seen = fake.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, format!("/boards/{TEST_BOARD_ID}"));
    assert_eq!(seen[0].api_key.as_deref(), Some(FAKE_API_KEY));
    assert_eq!(seen[0].content_type.as_deref(), Some("application/vnd.api+json"));
    assert_eq!(seen[0].query.get("include").map(String::as_str), Some("posts,sections"));
}

#[tokio::test]
async fn wrong_key_is_401_with_hint_and_not_retried() {
    let fake = fake();
    let base = fake.spawn().await.unwrap();

    let err = client(&base, "wrong")
        .fetch_board(TEST_BOARD_ID, BoardInclude::POSTS)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 401,
            message: "Invalid API key".into()
        }
    );
    assert_eq!(err.hint(), Some("Check your API key (PADLET_API_KEY)"));
    assert_eq!(fake.seen().len(), 1);
}

#[tokio::test]
async fn unavailable_reads_are_retried() {
    let fake = fake().fail_next(2);
    let base = fake.spawn().await.unwrap();

    let snapshot = client(&base, FAKE_API_KEY)
        .fetch_board(TEST_BOARD_ID, BoardInclude::POSTS)
        .await
        .unwrap();

    assert_eq!(snapshot.document.included.len(), 3);
    assert_eq!(fake.seen().len(), 3);
}

#[tokio::test]
async fn exhausted_retries_return_the_status() {
    let fake = fake().fail_next(10);
    let base = fake.spawn().await.unwrap();

    let err = client(&base, FAKE_API_KEY)
        .fetch_board(TEST_BOARD_ID, BoardInclude::POSTS)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(fake.seen().len(), 4);
}

#[tokio::test]
async fn slow_board_times_out() {
    let fake = fake().delay(Duration::from_millis(800));
    let base = fake.spawn().await.unwrap();
    let client = PadletClient::new(&base, SecretString::from(FAKE_API_KEY.to_string()), Duration::from_millis(100))
        .unwrap()
        .with_retry(RetryConfig::disabled());

    let err = client.fetch_board(TEST_BOARD_ID, BoardInclude::POSTS).await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_board_is_a_transport_error() {
    let client = client("http://127.0.0.1:9/v1", FAKE_API_KEY).with_retry(RetryConfig::disabled());
    let err = client.fetch_board(TEST_BOARD_ID, BoardInclude::POSTS).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn create_post_sends_json_api_document() {
    let fake = fake();
    let base = fake.spawn().await.unwrap();
    let draft = PostDraft {
        subject: "😍 인생 작품".into(),
        body: "감동".into(),
        color: Some("red".into()),
        map_pin: Some(MapPin {
            latitude: 37.5116828,
            longitude: 127.059151,
            location_name: "COEX".into(),
        }),
        ..Default::default()
    };

    let created = client(&base, FAKE_API_KEY).create_post(TEST_BOARD_ID, &draft).await.unwrap();

    assert_eq!(created.id, "post-1");
    let seen = fake.seen();
    assert_eq!(seen[0].path, format!("/boards/{TEST_BOARD_ID}/posts"));
    let data = &seen[0].body["data"];
    assert_eq!(data["type"], "post");
    assert_eq!(data["attributes"]["content"]["subject"], "😍 인생 작품");
    assert_eq!(data["attributes"]["color"], "red");
    assert_eq!(data["attributes"]["mapProps"]["locationName"], "COEX");
    assert!(data["attributes"]["content"].get("attachment").is_none());
}

#[tokio::test]
async fn writes_are_not_retried() {
    let fake = fake().fail_next(1);
    let base = fake.spawn().await.unwrap();

    let err = client(&base, FAKE_API_KEY)
        .create_post(TEST_BOARD_ID, &PostDraft::default())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(fake.seen().len(), 1);
}

#[tokio::test]
async fn create_comment_posts_html_content() {
    let fake = fake();
    let base = fake.spawn().await.unwrap();

    let created = client(&base, FAKE_API_KEY).create_comment("p1", "<p>팁</p>").await.unwrap();

    assert_eq!(created.id, "comment-1");
    let seen = fake.seen();
    assert_eq!(seen[0].path, "/posts/p1/comments");
    assert_eq!(seen[0].body["data"]["attributes"]["htmlContent"], "<p>팁</p>");
}
