//! Pretty output formatting.

use sampletrack_core::sample::{CreatedSample, SampleView};

/// Format a sample for display.
pub fn format_sample(sample: &SampleView) -> String {
    format!(
        "{} [{}]\n  Pseudonym: {}\n  Submitter: {}\n  Collected: {}\n  Result: {}\n  Tested: {}",
        sample.sample_id,
        sample.status.as_str(),
        sample.patient_pseudonym,
        sample.submitter_email,
        sample.collection_date,
        sample.test_result.as_str(),
        sample.test_date.as_deref().unwrap_or("-"),
    )
}

/// Format a freshly created sample, token included.
pub fn format_created(created: &CreatedSample) -> String {
    format!(
        "{}\n  Access token: {}\n\nStore the access token now, it cannot be shown again.",
        format_sample(&created.sample),
        created.access_token
    )
}
