//! Redis event bus for multi-instance deployments.

mod bus;
mod error;

pub use bus::RedisEventBus;
