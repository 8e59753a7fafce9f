pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::triggers::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/triggers/skill-sync",
            post(handlers::handle_skill_sync),
        )
        .route(
            "/api/v1/triggers/skill-summary-cleanup",
            post(handlers::handle_skill_summary_cleanup),
        )
        .route(
            "/api/v1/triggers/resume-skill-summary",
            post(handlers::handle_resume_skill_summary),
        )
        .route(
            "/api/v1/triggers/resume-feedback",
            post(handlers::handle_resume_feedback),
        )
        .route(
            "/api/v1/triggers/role-fitness",
            post(handlers::handle_role_fitness),
        )
        .route(
            "/api/v1/triggers/role-fitness-detailed",
            post(handlers::handle_role_fitness_detailed),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::attachments::fake::StaticTextSource;
    use crate::automations::Clients;
    use crate::config::Config;
    use crate::llm_client::fake::ScriptedGenerator;
    use crate::record_store::memory::MemoryStore;

    fn app_with(store: Arc<MemoryStore>, llm: Arc<ScriptedGenerator>, config: Config) -> Router {
        let clients = Clients {
            store,
            llm,
            attachments: Arc::new(
                StaticTextSource::default()
                    .with("https://dl.example/resume.txt", "Rust, Tokio, Postgres")
                    .with("https://dl.example/jd.txt", "Backend engineer"),
            ),
        };
        build_router(AppState { clients, config })
    }

    fn app(store: Arc<MemoryStore>) -> Router {
        app_with(store, Arc::new(ScriptedGenerator::default()), Config::for_tests())
    }

    fn trigger(path: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(Arc::new(MemoryStore::new())), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_skill_sync_trigger_creates_skills() {
        let store = Arc::new(MemoryStore::new());
        store.insert(
            "Candidates",
            "recCAND",
            json!({"Skill Summary Final": "Languages: Rust, Go"}),
        );

        let (status, body) = send(
            app(store.clone()),
            trigger(
                "/api/v1/triggers/skill-sync",
                json!({"airTableRecordId": "recCAND"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"automation": "skill-sync", "record_id": "recCAND", "status": "completed"})
        );
        let skills: Vec<_> = store
            .records("Candidate Skills")
            .iter()
            .filter_map(|r| r.text("Skill").map(str::to_string))
            .collect();
        assert_eq!(skills, vec!["Rust", "Go"]);
    }

    #[tokio::test]
    async fn test_record_id_alias_is_accepted() {
        let store = Arc::new(MemoryStore::new());
        store.insert("Candidates", "rec1", json!({"Skill Summary": "Cloud: AWS"}));

        let (status, body) = send(
            app(store.clone()),
            trigger(
                "/api/v1/triggers/skill-summary-cleanup",
                json!({"recordId": "rec1"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["record_id"], "rec1");
        assert_eq!(
            store.records("Candidates")[0].text("Skill Summary Final"),
            Some("Cloud: AWS")
        );
    }

    #[tokio::test]
    async fn test_blank_record_id_is_rejected() {
        let (status, body) = send(
            app(Arc::new(MemoryStore::new())),
            trigger(
                "/api/v1/triggers/resume-feedback",
                json!({"airTableRecordId": "  "}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/triggers/role-fitness")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(app(Arc::new(MemoryStore::new())), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_trigger_token_is_enforced() {
        let config = Config {
            trigger_token: Some("s3cret".to_string()),
            ..Config::for_tests()
        };
        let app = app_with(
            Arc::new(MemoryStore::new()),
            Arc::new(ScriptedGenerator::default()),
            config,
        );

        let (status, body) = send(
            app.clone(),
            trigger(
                "/api/v1/triggers/skill-sync",
                json!({"airTableRecordId": "recCAND"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let mut request = trigger(
            "/api/v1/triggers/skill-sync",
            json!({"airTableRecordId": "recCAND"}),
        );
        request
            .headers_mut()
            .insert("authorization", "Bearer s3cret".parse().unwrap());
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_automation_failure_still_completes() {
        // No such record, and the model would fail if it were reached.
        let llm = Arc::new(ScriptedGenerator::replying([Err(500)]));
        let (status, body) = send(
            app_with(Arc::new(MemoryStore::new()), llm, Config::for_tests()),
            trigger(
                "/api/v1/triggers/resume-skill-summary",
                json!({"airTableRecordId": "recGONE"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "completed");
        assert_eq!(body["automation"], "resume-skill-summary");
    }

    #[tokio::test]
    async fn test_role_fitness_detailed_trigger_writes_evaluation() {
        let store = Arc::new(MemoryStore::new());
        store.insert(
            "Candidate Role Options",
            "recPAIR",
            json!({
                "Resume (from Candidates)": [{"url": "https://dl.example/resume.txt"}],
                "JD (from Roles)": [{"url": "https://dl.example/jd.txt"}]
            }),
        );
        let llm = Arc::new(ScriptedGenerator::replying([Ok(
            "Overall Score: 4.0".to_string()
        )]));

        let (status, _) = send(
            app_with(store.clone(), llm, Config::for_tests()),
            trigger(
                "/api/v1/triggers/role-fitness-detailed",
                json!({"airTableRecordId": "recPAIR"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            store.records("Candidate Role Options")[0].text("Evaluation - Detailed"),
            Some("Overall Score: 4.0")
        );
    }
}
