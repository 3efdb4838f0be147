//! Sample orchestration: authorization, mutation, persistence, notification.

mod error;
mod locks;
mod samples;

pub use error::ServiceError;
pub use locks::{KeyGuard, KeyedLocks};
pub use samples::{SampleService, ServiceSettings};
