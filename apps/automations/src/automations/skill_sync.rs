//! Skill Sync: turns a candidate's skill summary into linked skill records.
//!
//! Flow: fetch summary → list existing skills → parse → per-name existence
//! check → create missing names in batches of `MAX_RECORDS_PER_REQUEST`.
//!
//! Every store call is awaited before the next one starts. A failing call aborts
//! the run; batches created before the failure stay created.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info};

use crate::config::TableNames;
use crate::record_store::formula::{and, field_equals};
use crate::record_store::{Fields, RecordStore, StoreError, MAX_RECORDS_PER_REQUEST};

/// Where the workflow reads summaries and writes skills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSyncConfig {
    pub candidates_table: String,
    pub skills_table: String,
    /// Candidate field holding the cleaned skill summary.
    pub summary_field: String,
    /// Skill field holding the skill name.
    pub skill_field: String,
    /// Skill field linking back to the candidate record.
    pub candidate_link_field: String,
    /// Skill field exposing the linked candidate's record ID to formulas.
    pub candidate_id_field: String,
}

impl SkillSyncConfig {
    pub fn new(tables: &TableNames) -> Self {
        Self {
            candidates_table: tables.candidates.clone(),
            skills_table: tables.candidate_skills.clone(),
            summary_field: "Skill Summary Final".to_string(),
            skill_field: "Skill".to_string(),
            candidate_link_field: "Candidate".to_string(),
            candidate_id_field: "candidate_id".to_string(),
        }
    }
}

/// Counts gathered during one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub parsed: usize,
    pub existing: usize,
    pub created: usize,
    pub batches: usize,
}

pub struct SkillSyncWorkflow {
    store: Arc<dyn RecordStore>,
    config: SkillSyncConfig,
}

impl SkillSyncWorkflow {
    pub fn new(store: Arc<dyn RecordStore>, config: SkillSyncConfig) -> Self {
        Self { store, config }
    }

    /// Syncs one candidate. Failures are logged with the candidate ID and
    /// never returned; the trigger always sees a normal completion.
    pub async fn sync(&self, candidate_id: &str) {
        info!(candidate_id, "Processing candidate");
        match self.run(candidate_id).await {
            Ok(report) => info!(
                candidate_id,
                parsed = report.parsed,
                created = report.created,
                batches = report.batches,
                "Finished processing candidate"
            ),
            Err(e) => error!(candidate_id, "Error processing candidate: {e}"),
        }
    }

    /// The sync itself, with failures surfaced.
    pub async fn run(&self, candidate_id: &str) -> Result<SyncReport, StoreError> {
        let summary = self.fetch_skill_summary(candidate_id).await?;

        let existing = self.fetch_existing_skills(candidate_id).await?;
        info!(
            candidate_id,
            count = existing.len(),
            "Found existing skills: {existing:?}"
        );

        let names = summary
            .as_deref()
            .map(parse_skill_summary)
            .unwrap_or_default();
        debug!(candidate_id, count = names.len(), "Parsed skill summary");

        let mut to_create: Vec<String> = Vec::new();
        for name in &names {
            if to_create.contains(name) {
                debug!(candidate_id, skill = %name, "Skill repeated in summary");
                continue;
            }
            if self.skill_exists(candidate_id, name).await? {
                debug!(candidate_id, skill = %name, "Skill already exists");
            } else {
                to_create.push(name.clone());
            }
        }

        let mut batches = 0;
        for batch in to_create.chunks(MAX_RECORDS_PER_REQUEST) {
            self.create_skills(candidate_id, batch).await?;
            batches += 1;
        }

        Ok(SyncReport {
            parsed: names.len(),
            existing: existing.len(),
            created: to_create.len(),
            batches,
        })
    }

    /// The candidate's summary text. An absent record or field yields `None`.
    async fn fetch_skill_summary(&self, candidate_id: &str) -> Result<Option<String>, StoreError> {
        let record = self
            .store
            .get_record(&self.config.candidates_table, candidate_id)
            .await?;
        let summary = record
            .as_ref()
            .and_then(|r| r.text(&self.config.summary_field))
            .map(str::to_string);
        if summary.is_none() {
            info!(
                candidate_id,
                field = %self.config.summary_field,
                "Candidate has no skill summary"
            );
        }
        Ok(summary)
    }

    /// Names of every skill linked to the candidate, duplicates included.
    async fn fetch_existing_skills(&self, candidate_id: &str) -> Result<Vec<String>, StoreError> {
        let formula = field_equals(&self.config.candidate_id_field, candidate_id);
        let records = self
            .store
            .list_records(&self.config.skills_table, &formula)
            .await?;
        Ok(records
            .iter()
            .filter_map(|r| r.text(&self.config.skill_field))
            .map(str::to_string)
            .collect())
    }

    /// Live lookup of one exact (candidate, name) pair.
    async fn skill_exists(&self, candidate_id: &str, name: &str) -> Result<bool, StoreError> {
        let formula = and(&[
            field_equals(&self.config.candidate_id_field, candidate_id),
            field_equals(&self.config.skill_field, name),
        ]);
        let records = self
            .store
            .list_records(&self.config.skills_table, &formula)
            .await?;
        Ok(!records.is_empty())
    }

    async fn create_skills(&self, candidate_id: &str, names: &[String]) -> Result<(), StoreError> {
        let records: Vec<Fields> = names
            .iter()
            .map(|name| {
                let mut fields = Fields::new();
                fields.insert(
                    self.config.candidate_link_field.clone(),
                    json!([candidate_id]),
                );
                fields.insert(self.config.skill_field.clone(), json!(name));
                fields
            })
            .collect();

        self.store
            .create_records(&self.config.skills_table, records)
            .await?;
        info!(candidate_id, count = names.len(), "Created skill records");
        Ok(())
    }
}

/// Splits a skill summary into skill names, in order.
///
/// Fragments are separated by commas and newlines and trimmed. A fragment
/// containing a colon keeps only the text after the first colon, so the
/// category prefix of `Databases: Postgres` is dropped. Empty results are skipped.
/// Names are compared verbatim afterwards: `Go` and `go` are different skills.
pub fn parse_skill_summary(summary: &str) -> Vec<String> {
    summary
        .split(|c| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| match fragment.split_once(':') {
            Some((_, rest)) => rest.trim(),
            None => fragment,
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
