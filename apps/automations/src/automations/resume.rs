//! Resume automations: send a candidate's resume text to the model and store
//! the reply on the candidate record.

use tracing::{debug, error, info};

use crate::attachments::first_attachment_url;
use crate::automations::prompts::{
    resume_feedback_message, skill_summary_message, RESUME_FEEDBACK_SYSTEM, SKILL_SUMMARY_SYSTEM,
};
use crate::automations::{log_outcome, single_field, AutomationError, Clients, Outcome};
use crate::llm_client::CompletionRequest;

/// Attachment field holding the plain-text resume.
pub const RESUME_FIELD: &str = "Resume";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeTask {
    /// Categorized skills, written to `Skill Summary`.
    SkillSummary,
    /// Reviewer feedback on structure, grammar and spelling, written to `Resume Feedback`.
    Feedback,
}

impl ResumeTask {
    pub fn name(self) -> &'static str {
        match self {
            ResumeTask::SkillSummary => "resume-skill-summary",
            ResumeTask::Feedback => "resume-feedback",
        }
    }

    pub fn output_field(self) -> &'static str {
        match self {
            ResumeTask::SkillSummary => "Skill Summary",
            ResumeTask::Feedback => "Resume Feedback",
        }
    }

    fn request(self, resume_text: &str) -> CompletionRequest {
        match self {
            ResumeTask::SkillSummary => CompletionRequest {
                system: SKILL_SUMMARY_SYSTEM,
                prompt: skill_summary_message(resume_text),
                max_tokens: 2000,
                temperature: 0.1,
            },
            ResumeTask::Feedback => CompletionRequest {
                system: RESUME_FEEDBACK_SYSTEM,
                prompt: resume_feedback_message(resume_text),
                max_tokens: 4000,
                temperature: 0.6,
            },
        }
    }
}

pub struct ResumeAutomation {
    clients: Clients,
    table: String,
    task: ResumeTask,
}

impl ResumeAutomation {
    pub fn new(clients: Clients, table: impl Into<String>, task: ResumeTask) -> Self {
        Self {
            clients,
            table: table.into(),
            task,
        }
    }

    /// Processes one candidate. Failures are logged, never returned.
    pub async fn process(&self, record_id: &str) {
        let result = self.run(record_id).await;
        log_outcome(self.task.name(), record_id, &result);
    }

    pub async fn run(&self, record_id: &str) -> Result<Outcome, AutomationError> {
        let record = self.clients.store.get_record(&self.table, record_id).await?;
        let Some(url) = record
            .as_ref()
            .and_then(|r| first_attachment_url(&r.fields, RESUME_FIELD))
        else {
            error!(
                record_id,
                "The '{RESUME_FIELD}' field is missing, empty, or does not contain attachments"
            );
            return Ok(Outcome::Skipped);
        };
        info!(record_id, url, "Resume URL found");

        let resume_text = self.clients.attachments.fetch_text(url).await?;
        let output = self
            .clients
            .llm
            .generate(&self.task.request(&resume_text))
            .await?;
        debug!(record_id, task = self.task.name(), "Model output: {output}");

        self.clients
            .store
            .update_record(
                &self.table,
                record_id,
                single_field(self.task.output_field(), output),
            )
            .await?;
        Ok(Outcome::Completed)
    }
}
