//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use rusqlite::types::Type;
use rusqlite::Row;

use sampletrack_core::sample::{Sample, SampleStatus, TestResult};

/// Convert a SQLite row to a Sample.
///
/// Expected columns: sample_id, patient_pseudonym, submitter_email,
/// collection_date, status, test_result, test_date, access_token_hash
pub fn row_to_sample(row: &Row) -> rusqlite::Result<Sample> {
    let status: String = row.get(4)?;
    let test_result: String = row.get(5)?;

    Ok(Sample {
        sample_id: row.get(0)?,
        patient_pseudonym: row.get(1)?,
        submitter_email: row.get(2)?,
        collection_date: row.get(3)?,
        status: parse_status(&status, 4)?,
        test_result: parse_test_result(&test_result, 5)?,
        test_date: row.get(6)?,
        access_token_hash: row.get(7)?,
    })
}

fn parse_status(value: &str, column: usize) -> rusqlite::Result<SampleStatus> {
    SampleStatus::parse(value).ok_or_else(|| invalid_column(column, "status", value))
}

fn parse_test_result(value: &str, column: usize) -> rusqlite::Result<TestResult> {
    TestResult::parse(value).ok_or_else(|| invalid_column(column, "test_result", value))
}

fn invalid_column(column: usize, name: &str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Text,
        format!("unknown {name} '{value}'").into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_known_values() {
        assert_eq!(parse_status("pending", 4).unwrap(), SampleStatus::Pending);
        assert_eq!(parse_status("failed", 4).unwrap(), SampleStatus::Failed);
    }

    #[test]
    fn test_parse_status_unknown_value() {
        let err = parse_status("lost", 4).unwrap_err();
        assert!(matches!(
            err,
            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, _)
        ));
    }

    #[test]
    fn test_parse_test_result_unknown_value() {
        assert!(parse_test_result("", 5).is_err());
        assert_eq!(
            parse_test_result("negative", 5).unwrap(),
            TestResult::Negative
        );
    }
}
