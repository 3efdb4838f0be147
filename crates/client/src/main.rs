//! sampletrack-client CLI entry point.

use clap::Parser;
use sampletrack_client::cli::{Cli, Commands, OutputFormat};
use sampletrack_client::client::SampletrackClient;
use sampletrack_client::output::{format_output, pretty};
use sampletrack_core::sample::{NewSample, SampleUpdate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = SampletrackClient::new(&cli.base_url);

    match cli.command {
        Commands::Samples(samples_cmd) => {
            use sampletrack_client::cli::samples::SamplesAction;
            match samples_cmd.action {
                SamplesAction::Create {
                    pseudonym,
                    email,
                    collection_date,
                } => {
                    let created = client
                        .create_sample(&NewSample::new(pseudonym, email, collection_date))
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&created, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_created(&created))
                        }
                    }
                }
                SamplesAction::Get { sample_id, token } => {
                    let sample = client.get_sample(&sample_id, &token).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&sample, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_sample(&sample)),
                    }
                }
                SamplesAction::Update {
                    sample_id,
                    token,
                    status,
                    result,
                    test_date,
                } => {
                    let update = SampleUpdate::new(&sample_id, status, result, test_date);
                    client.update_sample(&update, &token).await?;
                    if !cli.quiet {
                        println!("Updated sample {}", sample_id);
                    }
                }
            }
        }
        Commands::Health(health_cmd) => {
            use sampletrack_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Live => {
                    client.livez().await?;
                    if !cli.quiet {
                        println!("live");
                    }
                }
                HealthAction::Ready => {
                    let readiness = client.readyz().await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&readiness, cli.format))
                        }
                        OutputFormat::Pretty => println!(
                            "{}",
                            if readiness.healthy { "ready" } else { "not ready" }
                        ),
                    }
                }
            }
        }
    }

    Ok(())
}
