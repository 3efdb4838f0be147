//! CLI command definitions.

pub mod health;
pub mod samples;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the sampletrack API.
#[derive(Debug, Parser)]
#[command(name = "sampletrack-client")]
#[command(about = "CLI client for the sampletrack API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "SAMPLETRACK_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sample management.
    Samples(samples::SamplesCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampletrack_core::sample::{SampleStatus, TestResult};

    #[test]
    fn test_parse_update_command() {
        let cli = Cli::try_parse_from([
            "sampletrack-client",
            "samples",
            "update",
            "Ab12Cd34Ef",
            "--token",
            "AbCdEfGh12345678",
            "--status",
            "completed",
            "--result",
            "negative",
            "--test-date",
            "2023-02-03T11:45",
        ])
        .unwrap();

        let Commands::Samples(cmd) = cli.command else {
            panic!("Expected samples command");
        };
        match cmd.action {
            samples::SamplesAction::Update {
                sample_id,
                token,
                status,
                result,
                test_date,
            } => {
                assert_eq!(sample_id, "Ab12Cd34Ef");
                assert_eq!(token, "AbCdEfGh12345678");
                assert_eq!(status, SampleStatus::Completed);
                assert_eq!(result, TestResult::Negative);
                assert_eq!(test_date, "2023-02-03T11:45");
            }
            other => panic!("Expected update action, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = Cli::try_parse_from([
            "sampletrack-client",
            "samples",
            "update",
            "Ab12Cd34Ef",
            "--token",
            "t",
            "--status",
            "lost",
            "--result",
            "negative",
            "--test-date",
            "2023-02-03T11:45",
        ]);
        assert!(result.is_err());
    }
}
