//! Axum route handlers for the automation triggers.

use axum::{extract::rejection::JsonRejection, extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};

use crate::automations::resume::{ResumeAutomation, ResumeTask};
use crate::automations::role_fitness::{FitnessReport, RoleFitness};
use crate::automations::skill_sync::{SkillSyncConfig, SkillSyncWorkflow};
use crate::automations::summary_cleanup::SummaryCleanup;
use crate::errors::AppError;
use crate::state::AppState;
use crate::triggers::authorize;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TriggerRequest {
    #[serde(rename = "airTableRecordId", alias = "recordId", default)]
    pub record_id: String,
}

#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    pub automation: &'static str,
    pub record_id: String,
    pub status: &'static str,
}

/// Validates the caller and the payload, returning the record ID to process.
fn accept(
    state: &AppState,
    headers: &HeaderMap,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<String, AppError> {
    authorize(&state.config, headers)?;
    let Json(request) = payload?;
    let record_id = request.record_id.trim();
    if record_id.is_empty() {
        return Err(AppError::Validation(
            "airTableRecordId cannot be empty".to_string(),
        ));
    }
    Ok(record_id.to_string())
}

fn completed(automation: &'static str, record_id: String) -> Json<TriggerResponse> {
    Json(TriggerResponse {
        automation,
        record_id,
        status: "completed",
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/triggers/skill-sync
///
/// Creates the missing skill records for a candidate from their final skill summary.
pub async fn handle_skill_sync(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<Json<TriggerResponse>, AppError> {
    let record_id = accept(&state, &headers, payload)?;
    SkillSyncWorkflow::new(
        state.clients.store.clone(),
        SkillSyncConfig::new(&state.config.tables),
    )
    .sync(&record_id)
    .await;
    Ok(completed("skill-sync", record_id))
}

/// POST /api/v1/triggers/skill-summary-cleanup
pub async fn handle_skill_summary_cleanup(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<Json<TriggerResponse>, AppError> {
    let record_id = accept(&state, &headers, payload)?;
    SummaryCleanup::new(
        state.clients.store.clone(),
        state.config.tables.candidates.clone(),
    )
    .process(&record_id)
    .await;
    Ok(completed("skill-summary-cleanup", record_id))
}

/// POST /api/v1/triggers/resume-skill-summary
pub async fn handle_resume_skill_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<Json<TriggerResponse>, AppError> {
    let record_id = accept(&state, &headers, payload)?;
    run_resume_task(&state, ResumeTask::SkillSummary, &record_id).await;
    Ok(completed(ResumeTask::SkillSummary.name(), record_id))
}

/// POST /api/v1/triggers/resume-feedback
pub async fn handle_resume_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<Json<TriggerResponse>, AppError> {
    let record_id = accept(&state, &headers, payload)?;
    run_resume_task(&state, ResumeTask::Feedback, &record_id).await;
    Ok(completed(ResumeTask::Feedback.name(), record_id))
}

/// POST /api/v1/triggers/role-fitness
pub async fn handle_role_fitness(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<Json<TriggerResponse>, AppError> {
    let record_id = accept(&state, &headers, payload)?;
    run_fitness_report(&state, FitnessReport::General, &record_id).await;
    Ok(completed(FitnessReport::General.name(), record_id))
}

/// POST /api/v1/triggers/role-fitness-detailed
pub async fn handle_role_fitness_detailed(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<Json<TriggerResponse>, AppError> {
    let record_id = accept(&state, &headers, payload)?;
    run_fitness_report(&state, FitnessReport::Detailed, &record_id).await;
    Ok(completed(FitnessReport::Detailed.name(), record_id))
}

async fn run_resume_task(state: &AppState, task: ResumeTask, record_id: &str) {
    ResumeAutomation::new(
        state.clients.clone(),
        state.config.tables.candidates.clone(),
        task,
    )
    .process(record_id)
    .await;
}

async fn run_fitness_report(state: &AppState, report: FitnessReport, record_id: &str) {
    RoleFitness::new(
        state.clients.clone(),
        state.config.tables.role_options.clone(),
        report,
    )
    .process(record_id)
    .await;
}
