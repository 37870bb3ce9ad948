//! Turns a fetched board document into [`Post`] records.
//!
//! Only `included` entries of type `post` are considered; sections, the
//! board itself and anything unknown are skipped. Every attribute is
//! optional, so extraction never fails.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use domains::document::{BoardDocument, Resource};
use domains::models::{GeoPoint, Post};
use tracing::debug;

pub fn extract_posts(document: &BoardDocument) -> Vec<Post> {
    document
        .included
        .iter()
        .filter(|r| r.is_post())
        .map(extract_post)
        .collect()
}

pub fn extract_post(resource: &Resource) -> Post {
    let attrs = resource.post_attributes();
    let content = attrs.content.unwrap_or_default();
    let map = attrs.map_props.unwrap_or_default();

    let created_at = attrs.created_at.as_deref().and_then(|raw| match parse_timestamp(raw) {
        Ok(at) => Some(at),
        Err(err) => {
            debug!(post_id = %resource.id, raw, error = %err, "skipping unparseable createdAt");
            None
        }
    });

    let geo = match (map.latitude, map.longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
        _ => None,
    };

    Post {
        id: resource.id.clone(),
        subject: content.subject.unwrap_or_default(),
        body: content.body_html.or(content.body).unwrap_or_default(),
        created_at,
        created_at_raw: attrs.created_at,
        geo,
        location: map.location_name.filter(|name| !name.trim().is_empty()),
        color: attrs.color,
    }
}

/// ISO-8601 timestamp. A trailing `Z` means UTC; a timestamp without any
/// offset is taken as UTC too.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw).or_else(|err| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc().fixed_offset())
            .map_err(|_| err)
    })
}
