use axum::{Router, routing::get};

use crate::state::AppState;

pub mod health;

/// Every domain route, without docs or middleware.
///
/// Companies are nested under `/companies`; search and ingestion routes are
/// registered at their absolute paths.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/companies", domain_companies::handlers::router(state.companies.clone()))
        .merge(domain_search::handlers::router(state.search.clone()))
        .merge(domain_yc::handlers::router(state.yc.clone()))
}

/// `/ready`, checking the database through the shared pool
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use domain_search::{InterpreterConfig, SearchConfig};
    use domain_vector::{InMemoryVectorIndex, OpenAIConfig, OpenAIProvider, VectorIndexConfig};
    use domain_yc::YcConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let openai = OpenAIConfig::new("sk-test".to_string())
            .with_base_url("http://127.0.0.1:1".to_string());
        let config = Config {
            app: app_info!(),
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: PostgresConfig::new("postgresql://localhost/yc"),
            openai: openai.clone(),
            vector: VectorIndexConfig::memory(),
            search: SearchConfig {
                interpreter: InterpreterConfig::Passthrough,
                default_top_k: 100,
            },
            yc: YcConfig::default(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        AppState::new(
            config,
            db,
            Arc::new(OpenAIProvider::new(openai)),
            Arc::new(InMemoryVectorIndex::new()),
        )
    }

    async fn post_json(router: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_search_aliases_are_mounted() {
        let state = test_state();
        for uri in ["/companies/search", "/search", "/api/search"] {
            let (status, body) = post_json(routes(&state), uri, r#"{"query": "  "}"#).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["message"], "Query is required");
        }
    }

    #[tokio::test]
    async fn test_company_create_validates_before_touching_stores() {
        let state = test_state();
        let (status, _) = post_json(routes(&state), "/companies", r#"{"name": ""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
