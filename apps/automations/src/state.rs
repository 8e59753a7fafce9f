use crate::automations::Clients;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record store, model and attachment clients. Trait objects so tests can
    /// swap in in-memory fakes.
    pub clients: Clients,
    pub config: Config,
}
