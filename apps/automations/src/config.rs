use anyhow::{Context, Result};

const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub airtable_api_url: String,
    pub airtable_base_id: String,
    pub airtable_access_token: String,
    pub anthropic_api_key: String,
    pub anthropic_api_url: Option<String>,
    pub anthropic_model: Option<String>,
    pub tables: TableNames,
    /// Shared secret the record-store automations send as a bearer token.
    /// Triggers are accepted unauthenticated when unset.
    pub trigger_token: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

/// Names of the tables the automations read and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub candidates: String,
    pub candidate_skills: String,
    pub role_options: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            candidates: "Candidates".to_string(),
            candidate_skills: "Candidate Skills".to_string(),
            role_options: "Candidate Role Options".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = TableNames::default();

        Ok(Config {
            airtable_api_url: optional_env("AIRTABLE_API_URL")
                .unwrap_or_else(|| DEFAULT_AIRTABLE_API_URL.to_string()),
            airtable_base_id: require_env("AIRTABLE_BASE_ID")?,
            airtable_access_token: require_env("AIRTABLE_ACCESS_TOKEN")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: optional_env("ANTHROPIC_API_URL"),
            anthropic_model: optional_env("ANTHROPIC_MODEL"),
            tables: TableNames {
                candidates: optional_env("CANDIDATES_TABLE").unwrap_or(defaults.candidates),
                candidate_skills: optional_env("CANDIDATE_SKILLS_TABLE")
                    .unwrap_or(defaults.candidate_skills),
                role_options: optional_env("ROLE_OPTIONS_TABLE").unwrap_or(defaults.role_options),
            },
            trigger_token: optional_env("TRIGGER_TOKEN"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, treating an empty value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
impl Config {
    /// Configuration used by unit tests. Points at unroutable endpoints.
    pub fn for_tests() -> Self {
        Config {
            airtable_api_url: "http://127.0.0.1:9/v0".to_string(),
            airtable_base_id: "appTEST".to_string(),
            airtable_access_token: "pat-test".to_string(),
            anthropic_api_key: "sk-test".to_string(),
            anthropic_api_url: None,
            anthropic_model: None,
            tables: TableNames::default(),
            trigger_token: None,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
