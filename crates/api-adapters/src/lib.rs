//! artmap/crates/api-adapters/src/lib.rs
//!
//! Outbound adapters for the `BoardApi` port: the HTTP client for the real
//! board service and an offline demo board.

pub mod demo;
pub mod dto;

#[cfg(feature = "padlet-http")]
pub mod board_client;
#[cfg(feature = "padlet-http")]
pub mod retry;

pub use demo::DemoBoard;

#[cfg(feature = "padlet-http")]
pub use board_client::PadletClient;
#[cfg(feature = "padlet-http")]
pub use retry::RetryConfig;
