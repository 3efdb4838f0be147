//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository trait
//! defined in `sampletrack_core::storage`. The implementation is selected
//! at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): HashMap-backed store, data is lost on restart
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p sampletrack --no-default-features --features sqlite,memory
//! ```

// The in-memory store is always compiled so the service and handler tests
// can run against it regardless of the selected backend.
#[cfg_attr(feature = "sqlite", allow(dead_code))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[allow(unused_imports)]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
