//! Event bus backends, the update notifier and the internal-event relay.
//!
//! This module provides concrete implementations of the event traits
//! defined in `sampletrack_core::events`. The bus is selected at compile
//! time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): in-process bus on tokio broadcast channels
//! - `redis`: Redis pub/sub using the redis crate
//!
//! These features are mutually exclusive - only one event backend can be
//! enabled at a time. The memory bus is always compiled so tests can use it.

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one event backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No event backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p sampletrack --features memory"
);

#[cfg_attr(not(feature = "memory"), allow(dead_code))]
pub mod memory;
mod notifier;
mod relay;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[allow(unused_imports)]
pub use memory::MemoryEventBus;
pub use notifier::EventNotifier;
pub use relay::{run_relay, RelaySettings};

#[cfg(feature = "redis")]
#[allow(unused_imports)]
pub use redis_impl::RedisEventBus;
