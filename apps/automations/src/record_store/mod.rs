//! Record Store: access to the external base holding candidates, roles and skills.
//!
//! Automations depend on the `RecordStore` trait only. `AirtableClient` is the
//! production backend; unit tests substitute an in-memory store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod airtable;
pub mod formula;

pub use airtable::AirtableClient;

/// The platform rejects create requests carrying more records than this.
pub const MAX_RECORDS_PER_REQUEST: usize = 10;

/// Field values of a record, keyed by field name.
pub type Fields = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Fields,
}

impl Record {
    /// Returns a text field, or `None` if it is absent or not a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Record store fetch failed with status {status}: {message}")]
    Fetch { status: u16, message: String },

    #[error("Record store create failed with status {status}: {message}")]
    Create { status: u16, message: String },

    #[error("Record store update failed with status {status}: {message}")]
    Update { status: u16, message: String },

    #[error("Cannot create {0} records in one request (limit {MAX_RECORDS_PER_REQUEST})")]
    BatchTooLarge(usize),

    #[error("Invalid record store URL: {0}")]
    InvalidUrl(String),
}

/// Operations the automations need from the record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches one record by ID. A record that does not exist yields `Ok(None)`.
    async fn get_record(&self, table: &str, record_id: &str) -> Result<Option<Record>, StoreError>;

    /// Lists every record of `table` matching `formula`.
    async fn list_records(&self, table: &str, formula: &str) -> Result<Vec<Record>, StoreError>;

    /// Creates one record per entry of `records`, preserving order.
    /// At most `MAX_RECORDS_PER_REQUEST` records per call.
    async fn create_records(&self, table: &str, records: Vec<Fields>)
        -> Result<Vec<Record>, StoreError>;

    /// Overwrites the given fields of one record; other fields are untouched.
    async fn update_record(
        &self,
        table: &str,
        record_id: &str,
        fields: Fields,
    ) -> Result<(), StoreError>;
}
