//! artmap/crates/storage-adapters/src/lib.rs
//!
//! Implementations of the `SnapshotStore` port.

#[cfg(feature = "local-fs")]
pub mod local;

#[cfg(feature = "local-fs")]
pub use local::LocalSnapshotStore;
