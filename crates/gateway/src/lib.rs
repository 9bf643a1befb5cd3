//! HTTP relay for Parley.
//!
//! Exposes the speech-processing endpoint, a status page, health checks,
//! and the embedded practice page.
//!
//! Built on Axum.

pub mod api;
pub mod frontend;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    response::{Html, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use parley_config::AppConfig;
use parley_core::error::{ProviderError, VocabularyError};
use parley_core::{ApprovedWords, Tutor};

/// Shared application state for the relay.
pub struct GatewayState {
    pub tutor: Arc<Tutor>,
    pub deepl_key_set: bool,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

impl GatewayState {
    pub fn new(tutor: Arc<Tutor>, deepl_key_set: bool) -> Self {
        Self {
            tutor,
            deepl_key_set,
            start_time: chrono::Utc::now(),
        }
    }
}

pub type SharedState = Arc<GatewayState>;

/// Failures while assembling the relay from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Build the tutor pipeline: providers, vocabulary, and history sizing.
pub fn build_tutor(config: &AppConfig) -> Result<Tutor, StartupError> {
    let (translator, generator) = parley_providers::build_from_config(config)?;
    let vocabulary = ApprovedWords::load(&config.tutor.vocabulary_path)?;

    Ok(Tutor::new(translator, generator, Arc::new(vocabulary))
        .with_history_capacity(config.tutor.history_capacity)
        .with_history_window(config.tutor.history_window))
}

/// Build the Axum router with all relay routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(status_page_handler))
        .route("/test", get(test_handler))
        .route("/health", get(health_handler))
        .route("/api/process-speech", post(api::process_speech_handler))
        .with_state(state)
        .merge(frontend::frontend_router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Build the full router with CORS and body-size layers from config.
pub fn build_full_router(state: SharedState, config: &parley_config::GatewayConfig) -> Router {
    let cors = if config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    build_router(state)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(cors)
}

/// Start the relay HTTP server.
pub async fn start(config: AppConfig) -> Result<(), StartupError> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let tutor = Arc::new(build_tutor(&config)?);

    info!(
        approved_words = tutor.vocabulary().len(),
        model = %tutor.generator().model(),
        deepl = if config.has_deepl_key() { "Connected" } else { "Missing" },
        "Relay configured"
    );

    let state = Arc::new(GatewayState::new(tutor, config.has_deepl_key()));
    let app = build_full_router(state, &config.gateway);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(addr = %addr, "Relay listening");
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

async fn status_page_handler(State(state): State<SharedState>) -> Html<String> {
    let tutor = &state.tutor;
    Html(format!(
        "<h1>Parley: DeepL + Ollama relay</h1>\n\
         <p>DeepL API: {}</p>\n\
         <p>Approved words: {}</p>\n\
         <p>Ollama: {}</p>\n\
         <p><a href=\"/test\">Test API</a> · <a href=\"/practice\">Practice</a></p>\n",
        if state.deepl_key_set { "Ready" } else { "Missing" },
        tutor.vocabulary().len(),
        tutor.generator().model(),
    ))
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestResponse {
    message: String,
    approved_words_count: usize,
    deepl_key_set: bool,
}

async fn test_handler(State(state): State<SharedState>) -> Json<TestResponse> {
    Json(TestResponse {
        message: "DeepL + Ollama ready!".into(),
        approved_words_count: state.tutor.vocabulary().len(),
        deepl_key_set: state.deepl_key_set,
    })
}

#[derive(Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_secs: i64,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_secs: (chrono::Utc::now() - state.start_time).num_seconds(),
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::test_state;
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state(Some("hello friend")));

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn test_endpoint_reports_readiness() {
        let app = build_router(test_state(Some("hello friend")));

        let req = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "DeepL + Ollama ready!");
        assert_eq!(json["approvedWordsCount"], 3);
        assert_eq!(json["deeplKeySet"], true);
    }

    #[tokio::test]
    async fn status_page_names_model() {
        let app = build_router(test_state(Some("hello friend")));

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("canned-model"));
        assert!(text.contains("Approved words: 3"));
        assert!(text.contains("DeepL API: Ready"));
    }

    #[tokio::test]
    async fn cors_preflight_allowed() {
        let config = parley_config::GatewayConfig::default();
        let app = build_full_router(test_state(Some("hello friend")), &config);

        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/process-speech")
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
    }

    #[test]
    fn build_tutor_requires_key() {
        let config = AppConfig::default();
        let err = build_tutor(&config).err().unwrap();
        assert!(matches!(err, StartupError::Provider(_)));
    }
}
