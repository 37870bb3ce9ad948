//! JSON:API request documents for board writes.

use domains::error::ApiError;
use domains::models::PostDraft;
use serde_json::{json, Map, Value};

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(value)
}

/// `POST /boards/{id}/posts` body. Only non-empty draft fields are sent.
pub fn post_document(draft: &PostDraft) -> Value {
    let mut content = Map::new();
    if let Some(subject) = non_empty(&draft.subject) {
        content.insert("subject".into(), json!(subject));
    }
    if let Some(body) = non_empty(&draft.body) {
        content.insert("body".into(), json!(body));
    }
    if let Some(url) = draft.attachment_url.as_deref().and_then(non_empty) {
        content.insert("attachment".into(), json!({ "url": url }));
    }

    let mut attributes = Map::new();
    attributes.insert("content".into(), Value::Object(content));
    if let Some(color) = draft.color.as_deref().and_then(non_empty) {
        attributes.insert("color".into(), json!(color));
    }
    if let Some(pin) = &draft.map_pin {
        attributes.insert("mapProps".into(), json!(pin));
    }

    let mut data = json!({ "type": "post", "attributes": attributes });
    if let Some(section) = draft.section_id.as_deref().and_then(non_empty) {
        data["relationships"] = json!({ "section": { "data": { "id": section } } });
    }
    json!({ "data": data })
}

/// `POST /posts/{id}/comments` body.
pub fn comment_document(html_content: &str) -> Value {
    let mut attributes = Map::new();
    if let Some(html) = non_empty(html_content) {
        attributes.insert("htmlContent".into(), json!(html));
    }
    json!({ "data": { "type": "comment", "attributes": attributes } })
}

/// Id of the resource a write created (`data.id`).
pub fn created_id(response: &Value) -> Result<String, ApiError> {
    response
        .pointer("/data/id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ApiError::Decode("response has no data.id".into()))
}
