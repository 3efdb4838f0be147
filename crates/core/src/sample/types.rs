//! Sample record types.
//!
//! Each boundary gets its own struct: the creation input, the stored record,
//! the caller-visible view and the notification payload. Conversions between
//! them are plain functions so the hash never leaks by accident.

use serde::{Deserialize, Serialize};

/// Processing status of a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl SampleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleStatus::Pending => "pending",
            SampleStatus::Completed => "completed",
            SampleStatus::Failed => "failed",
        }
    }

    /// Parses the wire representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(SampleStatus::Pending),
            "completed" => Some(SampleStatus::Completed),
            "failed" => Some(SampleStatus::Failed),
            _ => None,
        }
    }
}

/// Outcome of the test run on a sample.
///
/// `Inconclusive` doubles as the "no result yet" value for fresh samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestResult {
    #[default]
    Inconclusive,
    Positive,
    Negative,
}

impl TestResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestResult::Inconclusive => "inconclusive",
            TestResult::Positive => "positive",
            TestResult::Negative => "negative",
        }
    }

    /// Parses the wire representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inconclusive" => Some(TestResult::Inconclusive),
            "positive" => Some(TestResult::Positive),
            "negative" => Some(TestResult::Negative),
            _ => None,
        }
    }
}

/// Creation input submitted by a caller.
///
/// Deliberately has no token or id fields so a caller cannot choose their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSample {
    pub patient_pseudonym: String,
    pub submitter_email: String,
    pub collection_date: String,
}

impl NewSample {
    pub fn new(
        patient_pseudonym: impl Into<String>,
        submitter_email: impl Into<String>,
        collection_date: impl Into<String>,
    ) -> Self {
        Self {
            patient_pseudonym: patient_pseudonym.into(),
            submitter_email: submitter_email.into(),
            collection_date: collection_date.into(),
        }
    }
}

/// A stored sample record.
///
/// `sample_id` and `access_token_hash` are set once by [`Sample::from_new`]
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub sample_id: String,
    pub patient_pseudonym: String,
    pub submitter_email: String,
    pub collection_date: String,
    pub status: SampleStatus,
    pub test_result: TestResult,
    pub test_date: Option<String>,
    pub access_token_hash: String,
}

impl Sample {
    /// Assembles a fresh record with default status and result.
    pub fn from_new(
        sample_id: impl Into<String>,
        new: NewSample,
        access_token_hash: impl Into<String>,
    ) -> Self {
        Self {
            sample_id: sample_id.into(),
            patient_pseudonym: new.patient_pseudonym,
            submitter_email: new.submitter_email,
            collection_date: new.collection_date,
            status: SampleStatus::default(),
            test_result: TestResult::default(),
            test_date: None,
            access_token_hash: access_token_hash.into(),
        }
    }

    /// Projection handed to external callers (no hash).
    pub fn view(&self) -> SampleView {
        SampleView {
            sample_id: self.sample_id.clone(),
            patient_pseudonym: self.patient_pseudonym.clone(),
            submitter_email: self.submitter_email.clone(),
            collection_date: self.collection_date.clone(),
            status: self.status,
            test_result: self.test_result,
            test_date: self.test_date.clone(),
        }
    }

    /// Payload broadcast after an update.
    pub fn notification(&self) -> SampleUpdated {
        SampleUpdated {
            sample_id: self.sample_id.clone(),
            submitter_email: self.submitter_email.clone(),
            status: self.status,
            test_result: self.test_result,
            test_date: self.test_date.clone(),
        }
    }
}

/// Caller-visible projection of a [`Sample`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleView {
    pub sample_id: String,
    pub patient_pseudonym: String,
    pub submitter_email: String,
    pub collection_date: String,
    pub status: SampleStatus,
    pub test_result: TestResult,
    pub test_date: Option<String>,
}

/// Response to a successful creation: the view plus the one-time plaintext token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSample {
    #[serde(flatten)]
    pub sample: SampleView,
    pub access_token: String,
}

/// New test outcome for an existing sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleUpdate {
    pub sample_id: String,
    pub status: SampleStatus,
    pub test_result: TestResult,
    pub test_date: String,
}

impl SampleUpdate {
    pub fn new(
        sample_id: impl Into<String>,
        status: SampleStatus,
        test_result: TestResult,
        test_date: impl Into<String>,
    ) -> Self {
        Self {
            sample_id: sample_id.into(),
            status,
            test_result,
            test_date: test_date.into(),
        }
    }

    /// Writes the mutable fields onto a record. Identity, creation fields and
    /// the hash are left alone.
    pub fn apply_to(&self, sample: &mut Sample) {
        sample.status = self.status;
        sample.test_result = self.test_result;
        sample.test_date = Some(self.test_date.clone());
    }
}

/// Notification payload for a finished update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleUpdated {
    pub sample_id: String,
    pub submitter_email: String,
    pub status: SampleStatus,
    pub test_result: TestResult,
    pub test_date: Option<String>,
}
