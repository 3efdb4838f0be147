//! SQLite repository implementation.
//!
//! Implements the repository trait from `sampletrack_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use sampletrack_core::sample::Sample;
use sampletrack_core::storage::{RepositoryError, Result, SampleRepository};

use super::conversions::row_to_sample;
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl SampleRepository for SqliteRepository {
    async fn get_sample(&self, sample_id: &str) -> Result<Sample> {
        let id = sample_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_SAMPLE_BY_ID)
                    .map_err(wrap_err)?;
                stmt.query_row([&id], row_to_sample).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, sample_id))
    }

    async fn insert_sample(&self, sample: &Sample) -> Result<()> {
        let record = sample.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_SAMPLE,
                    rusqlite::params![
                        record.sample_id,
                        record.patient_pseudonym,
                        record.submitter_email,
                        record.collection_date,
                        record.status.as_str(),
                        record.test_result.as_str(),
                        record.test_date,
                        record.access_token_hash
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, &sample.sample_id))
    }

    async fn replace_sample(&self, sample: &Sample) -> Result<()> {
        let record = sample.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::REPLACE_SAMPLE,
                        rusqlite::params![
                            record.sample_id,
                            record.patient_pseudonym,
                            record.submitter_email,
                            record.collection_date,
                            record.status.as_str(),
                            record.test_result.as_str(),
                            record.test_date
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, &sample.sample_id))
    }
}
