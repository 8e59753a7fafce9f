// Record-triggered automations.
// Every automation is a linear fetch → transform → write pipeline. Entry points
// log failures and return normally; the trigger caller never sees an error.

pub mod prompts;
pub mod resume;
pub mod role_fitness;
pub mod skill_sync;
pub mod summary_cleanup;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::attachments::{AttachmentError, TextSource};
use crate::llm_client::{LlmError, TextGenerator};
use crate::record_store::{Fields, RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error("The '{0}' field is missing or empty")]
    MissingField(&'static str),
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The output field was written.
    Completed,
    /// The record or its input field was absent; nothing was written.
    Skipped,
}

/// External services shared by the automations.
#[derive(Clone)]
pub struct Clients {
    pub store: Arc<dyn RecordStore>,
    pub llm: Arc<dyn TextGenerator>,
    pub attachments: Arc<dyn TextSource>,
}

/// A field map holding one value.
pub(crate) fn single_field(name: &str, value: impl Into<Value>) -> Fields {
    let mut fields = Fields::new();
    fields.insert(name.to_string(), value.into());
    fields
}

/// Logs the end of a run. Failures are logged here and go no further.
pub(crate) fn log_outcome(
    automation: &str,
    record_id: &str,
    result: &Result<Outcome, AutomationError>,
) {
    match result {
        Ok(Outcome::Completed) => info!(automation, record_id, "Record processed successfully"),
        Ok(Outcome::Skipped) => info!(automation, record_id, "Nothing to process"),
        Err(e) => error!(automation, record_id, "Error processing record: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_field_holds_one_entry() {
        let fields = single_field("Skill Summary", "Languages: Rust");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["Skill Summary"], "Languages: Rust");
    }

    #[test]
    fn test_missing_field_error_names_field() {
        let err = AutomationError::MissingField("Resume");
        assert_eq!(err.to_string(), "The 'Resume' field is missing or empty");
    }
}
