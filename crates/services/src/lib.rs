//! artmap/crates/services/src/lib.rs
//!
//! The board pipeline: extraction, statistics, moderation and reporting,
//! plus the posting workflows built on top of the same ports.

pub mod event_day;
pub mod extractor;
pub mod moderation;
pub mod report;
pub mod responder;
pub mod scheduler;
pub mod service;
pub mod stats;
pub mod submission;

pub use event_day::LiveStatistics;
pub use moderation::ModerationPolicy;
pub use responder::RespondOutcome;
pub use scheduler::{Cadence, Schedule, Task};
pub use service::{analysis_record, ArtMapService, DailyReport};
pub use submission::Experience;
