mod error;
mod types;
mod validation;

pub use error::ValidationError;
pub use types::{
    CreatedSample, NewSample, Sample, SampleStatus, SampleUpdate, SampleUpdated, SampleView,
    TestResult,
};
pub use validation::{
    validate_email, validate_new_sample, validate_pseudonym, validate_timestamp, validate_update,
    PSEUDONYM_MAX_LEN, PSEUDONYM_MIN_LEN,
};
