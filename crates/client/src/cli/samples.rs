//! Sample CLI commands.

use clap::{Parser, Subcommand};
use sampletrack_core::sample::{SampleStatus, TestResult};

/// Sample management commands.
#[derive(Debug, Parser)]
pub struct SamplesCommand {
    #[command(subcommand)]
    pub action: SamplesAction,
}

/// Available sample actions.
#[derive(Debug, Subcommand)]
pub enum SamplesAction {
    /// Register a new sample and print its access token.
    Create {
        /// Patient pseudonym (11 to 63 characters).
        #[arg(long)]
        pseudonym: String,
        /// Submitter email.
        #[arg(long)]
        email: String,
        /// Collection timestamp (YYYY-MM-DDTHH:MM).
        #[arg(long)]
        collection_date: String,
    },
    /// Get a sample.
    Get {
        /// Sample ID.
        sample_id: String,
        /// Access token returned at creation.
        #[arg(long, env = "SAMPLETRACK_TOKEN")]
        token: String,
    },
    /// Record a test outcome.
    Update {
        /// Sample ID.
        sample_id: String,
        /// Access token returned at creation.
        #[arg(long, env = "SAMPLETRACK_TOKEN")]
        token: String,
        /// New status (pending, completed, failed).
        #[arg(long, value_parser = parse_status)]
        status: SampleStatus,
        /// Test result (inconclusive, positive, negative).
        #[arg(long, value_parser = parse_result)]
        result: TestResult,
        /// Test timestamp (YYYY-MM-DDTHH:MM).
        #[arg(long)]
        test_date: String,
    },
}

fn parse_status(value: &str) -> Result<SampleStatus, String> {
    SampleStatus::parse(&value.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown status '{value}'"))
}

fn parse_result(value: &str) -> Result<TestResult, String> {
    TestResult::parse(&value.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown test result '{value}'"))
}
