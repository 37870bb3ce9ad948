//! Shared fixtures for the cross-crate tests: a fake board API served by
//! axum on an ephemeral port, and small board-document builders.

pub mod fake_board;

use chrono::{NaiveDate, NaiveDateTime};
use domains::document::BoardSnapshot;
use serde_json::{json, Value};

pub const TEST_BOARD_ID: &str = "blwpq840o1u57awd";

/// 2025-09-04 21:00, the report time on the event night.
pub fn event_night() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 4)
        .and_then(|d| d.and_hms_opt(21, 0, 0))
        .unwrap_or_default()
}

/// A `post` resource.
pub fn post(id: &str, subject: &str, body: &str, location: Option<&str>) -> Value {
    let mut attributes = json!({ "content": { "subject": subject, "bodyHtml": body } });
    if let Some(name) = location {
        attributes["mapProps"] = json!({ "latitude": 37.58, "longitude": 126.98, "locationName": name });
    }
    json!({ "id": id, "type": "post", "attributes": attributes })
}

pub fn section(id: &str) -> Value {
    json!({ "id": id, "type": "section", "attributes": { "title": id } })
}

pub fn board_document(included: Vec<Value>) -> Value {
    json!({
        "data": { "id": TEST_BOARD_ID, "type": "board", "attributes": { "title": "test board" } },
        "included": included
    })
}

/// Panics on a malformed document; test-only helper.
pub fn snapshot(included: Vec<Value>) -> BoardSnapshot {
    BoardSnapshot::from_value(board_document(included)).unwrap_or_else(|e| panic!("bad test board: {e}"))
}

/// The two-post board from the moderation scenario: an over-linked review
/// and an advertisement.
pub fn scenario_posts() -> Vec<Value> {
    vec![
        post("A", "👍 Great show", "http://a http://b http://c http://d", Some("삼청동")),
        post("B", "공식 홍보 할인!", "", None),
    ]
}
