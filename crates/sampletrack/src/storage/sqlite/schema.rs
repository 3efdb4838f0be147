//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Samples table. The primary key is the natural-key constraint that
-- rejects duplicate sample IDs on insert.
CREATE TABLE IF NOT EXISTS samples (
    sample_id TEXT PRIMARY KEY,
    patient_pseudonym TEXT NOT NULL,
    submitter_email TEXT NOT NULL,
    collection_date TEXT NOT NULL,
    status TEXT NOT NULL,
    test_result TEXT NOT NULL,
    test_date TEXT,
    access_token_hash TEXT NOT NULL
);
"#;

pub const INSERT_SAMPLE: &str = r#"
INSERT INTO samples (sample_id, patient_pseudonym, submitter_email, collection_date, status, test_result, test_date, access_token_hash)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SELECT_SAMPLE_BY_ID: &str = r#"
SELECT sample_id, patient_pseudonym, submitter_email, collection_date, status, test_result, test_date, access_token_hash
FROM samples
WHERE sample_id = ?1
"#;

// The ID and hash are written once at insert and are not part of the SET list.
pub const REPLACE_SAMPLE: &str = r#"
UPDATE samples
SET patient_pseudonym = ?2, submitter_email = ?3, collection_date = ?4, status = ?5, test_result = ?6, test_date = ?7
WHERE sample_id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS samples"));
        assert!(CREATE_TABLES.contains("sample_id TEXT PRIMARY KEY"));
    }

    #[test]
    fn test_replace_never_touches_hash() {
        assert!(REPLACE_SAMPLE.contains("UPDATE"));
        assert!(!REPLACE_SAMPLE.contains("access_token_hash"));
    }
}
