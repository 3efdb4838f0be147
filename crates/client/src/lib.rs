//! sampletrack_client - HTTP client and CLI for the sampletrack API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::SampletrackClient;
pub use error::{ClientError, Result};
