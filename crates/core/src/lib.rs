//! Core types and pure logic for sampletrack.
//!
//! Everything in this crate is free of I/O: sample types and validation,
//! the token authority, and the traits the server implements for storage,
//! notification and event transport.

pub mod events;
pub mod sample;
pub mod storage;
pub mod token;
