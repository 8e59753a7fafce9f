//! Role Fitness: evaluates a candidate's resume against a role's job
//! description. Runs on the candidate/role join table, whose lookup fields
//! expose both documents.

use tracing::{debug, error, info};

use crate::attachments::first_attachment_url;
use crate::automations::prompts::{
    fitness_detailed_message, fitness_general_message, FITNESS_DETAILED_SYSTEM,
    FITNESS_GENERAL_SYSTEM,
};
use crate::automations::{log_outcome, single_field, AutomationError, Clients, Outcome};
use crate::llm_client::CompletionRequest;

pub const RESUME_FIELD: &str = "Resume (from Candidates)";
pub const JOB_DESCRIPTION_FIELD: &str = "JD (from Roles)";

const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitnessReport {
    /// Narrative summary of how the candidate matches the role.
    General,
    /// Per-requirement 0–5 scores with an averaged overall score.
    Detailed,
}

impl FitnessReport {
    pub fn name(self) -> &'static str {
        match self {
            FitnessReport::General => "role-fitness",
            FitnessReport::Detailed => "role-fitness-detailed",
        }
    }

    pub fn output_field(self) -> &'static str {
        match self {
            FitnessReport::General => "Evaluation",
            FitnessReport::Detailed => "Evaluation - Detailed",
        }
    }

    fn request(self, resume_text: &str, job_description_text: &str) -> CompletionRequest {
        let (system, prompt) = match self {
            FitnessReport::General => (
                FITNESS_GENERAL_SYSTEM,
                fitness_general_message(resume_text, job_description_text),
            ),
            FitnessReport::Detailed => (
                FITNESS_DETAILED_SYSTEM,
                fitness_detailed_message(resume_text, job_description_text),
            ),
        };
        CompletionRequest {
            system,
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

pub struct RoleFitness {
    clients: Clients,
    table: String,
    report: FitnessReport,
}

impl RoleFitness {
    pub fn new(clients: Clients, table: impl Into<String>, report: FitnessReport) -> Self {
        Self {
            clients,
            table: table.into(),
            report,
        }
    }

    /// Evaluates one candidate/role pairing. Failures are logged, never returned.
    pub async fn process(&self, record_id: &str) {
        let result = self.run(record_id).await;
        log_outcome(self.report.name(), record_id, &result);
    }

    pub async fn run(&self, record_id: &str) -> Result<Outcome, AutomationError> {
        let Some(record) = self.clients.store.get_record(&self.table, record_id).await? else {
            error!(record_id, "Candidate role record not found");
            return Ok(Outcome::Skipped);
        };

        let Some(resume_url) = first_attachment_url(&record.fields, RESUME_FIELD) else {
            error!(
                record_id,
                "The '{RESUME_FIELD}' field is missing, empty, or does not contain attachments"
            );
            return Ok(Outcome::Skipped);
        };
        info!(record_id, url = resume_url, "Resume URL found");
        let resume_text = self.clients.attachments.fetch_text(resume_url).await?;

        let job_description_url = first_attachment_url(&record.fields, JOB_DESCRIPTION_FIELD)
            .ok_or(AutomationError::MissingField(JOB_DESCRIPTION_FIELD))?;
        info!(record_id, url = job_description_url, "Job description URL found");
        let job_description_text = self
            .clients
            .attachments
            .fetch_text(job_description_url)
            .await?;

        let evaluation = self
            .clients
            .llm
            .generate(&self.report.request(&resume_text, &job_description_text))
            .await?;
        debug!(record_id, report = self.report.name(), "Evaluation: {evaluation}");

        self.clients
            .store
            .update_record(
                &self.table,
                record_id,
                single_field(self.report.output_field(), evaluation),
            )
            .await?;
        Ok(Outcome::Completed)
    }
}
