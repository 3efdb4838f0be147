//! In-process event bus for single-instance deployments.

mod bus;

pub use bus::MemoryEventBus;
