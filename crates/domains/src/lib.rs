//! artmap/crates/domains/src/lib.rs
//!
//! Domain types and interface definitions for the art-map board toolkit.
//! Nothing in here performs I/O: adapters implement the ports, services
//! drive them.

pub mod document;
pub mod error;
pub mod locations;
pub mod models;
pub mod ports;
pub mod tally;

// Re-exporting for easier access in other crates
pub use document::*;
pub use error::*;
pub use models::*;
pub use ports::*;
pub use tally::Tally;

/// Extracts the board id from a board share URL.
///
/// Board ids are the 16-22 character suffix after the final hyphen of the
/// last path segment, e.g. `https://padlet.com/CSS2025/css_-1_map-blwpq840o1u57awd`
/// yields `blwpq840o1u57awd`.
pub fn board_id_from_url(url: &str) -> Option<&str> {
    let last = url.trim_end_matches('/').rsplit('/').next()?;
    let (_, candidate) = last.rsplit_once('-')?;
    (16..=22).contains(&candidate.len()).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_id_from_share_url() {
        assert_eq!(
            board_id_from_url("https://padlet.com/CSS2025/css_-1_map-blwpq840o1u57awd"),
            Some("blwpq840o1u57awd")
        );
        assert_eq!(
            board_id_from_url("https://padlet.com/CSS2025/css_-1_map-blwpq840o1u57awd/"),
            Some("blwpq840o1u57awd")
        );
    }

    #[test]
    fn test_board_id_rejects_short_suffix() {
        assert_eq!(board_id_from_url("https://padlet.com/CSS2025/my-board"), None);
        assert_eq!(board_id_from_url("https://padlet.com/CSS2025/noboard"), None);
        assert_eq!(board_id_from_url(""), None);
    }
}
