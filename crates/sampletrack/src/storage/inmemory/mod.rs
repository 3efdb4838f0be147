//! In-memory storage backend.
//!
//! Stores all samples in a HashMap wrapped in `Arc<RwLock<_>>`. Useful for
//! testing and development where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use sampletrack::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
