//! Skill Summary Cleanup: keeps only the `Category: items` lines of a
//! generated skill summary. No model call.

use std::sync::Arc;

use tracing::{debug, error};

use crate::automations::{log_outcome, single_field, AutomationError, Outcome};
use crate::record_store::RecordStore;

pub const INPUT_FIELD: &str = "Skill Summary";
pub const OUTPUT_FIELD: &str = "Skill Summary Final";

const AUTOMATION: &str = "skill-summary-cleanup";

/// Drops blank lines, lines without a colon, and category lines with nothing
/// between the first and second colon. Kept lines are returned verbatim,
/// separated by blank lines.
pub fn clean_up_category_items(input: &str) -> String {
    input
        .split('\n')
        .filter(|line| {
            !line.trim().is_empty()
                && line
                    .split(':')
                    .nth(1)
                    .map_or(false, |items| !items.trim().is_empty())
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub struct SummaryCleanup {
    store: Arc<dyn RecordStore>,
    table: String,
}

impl SummaryCleanup {
    pub fn new(store: Arc<dyn RecordStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Cleans one record's summary. Failures are logged, never returned.
    pub async fn process(&self, record_id: &str) {
        let result = self.run(record_id).await;
        log_outcome(AUTOMATION, record_id, &result);
    }

    pub async fn run(&self, record_id: &str) -> Result<Outcome, AutomationError> {
        let record = self.store.get_record(&self.table, record_id).await?;
        let Some(summary) = record
            .as_ref()
            .and_then(|r| r.text(INPUT_FIELD))
            .filter(|s| !s.is_empty())
        else {
            error!(record_id, "The '{INPUT_FIELD}' field is missing or empty");
            return Ok(Outcome::Skipped);
        };
        debug!(record_id, "Skill summary found: {summary}");

        let cleaned = clean_up_category_items(summary);
        debug!(record_id, "Cleaned up summary: {cleaned}");

        self.store
            .update_record(&self.table, record_id, single_field(OUTPUT_FIELD, cleaned))
            .await?;
        Ok(Outcome::Completed)
    }
}
