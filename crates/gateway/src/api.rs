//! The speech-processing endpoint.
//!
//! - `POST /api/process-speech` — transcript in, translated reply out

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use parley_core::{Language, PracticeReply};

use crate::SharedState;

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpeechRequest {
    /// The browser transcript.
    pub text: String,
    /// Practice language code; defaults to ES.
    #[serde(default)]
    pub target_lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced to HTTP clients as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::BadRequest(rejection.body_text())
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────

pub async fn process_speech_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ProcessSpeechRequest>, JsonRejection>,
) -> Result<Json<PracticeReply>, GatewayError> {
    let Json(payload) = payload?;

    let language = match payload.target_lang.as_deref() {
        Some(code) => {
            Language::parse_practice(code).map_err(|e| GatewayError::BadRequest(e.to_string()))?
        }
        None => Language::default(),
    };

    if payload.text.trim().is_empty() {
        return Err(GatewayError::BadRequest("text must not be empty".into()));
    }

    info!(lang = %language, "process-speech request");

    // A panic inside the pipeline surfaces as a 500 instead of a dropped connection.
    let tutor = state.tutor.clone();
    let text = payload.text;
    let reply = tokio::spawn(async move { tutor.respond(&text, language).await })
        .await
        .map_err(|e| {
            error!(error = %e, "Speech pipeline aborted");
            GatewayError::Internal(e.to_string())
        })?;

    Ok(Json(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_router;
    use crate::test_support::test_state;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/process-speech")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn processes_speech() {
        let app = build_router(test_state(Some("hello my friend, how is today")));

        let response = app
            .oneshot(post(r#"{"text":"שלום חבר","targetLang":"HE"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["userText"], "שלום חבר");
        assert_eq!(json["englishInput"], "[HE->EN] שלום חבר");
        assert_eq!(json["aiTextRaw"], "hello my friend, how is today");
        assert_eq!(json["aiText"], "Hello my friend, how is today.");
        assert_eq!(json["aiTextX"], "[EN->HE] Hello my friend, how is today.");
        assert_eq!(json["targetLang"], "HE");
        assert_eq!(json["wordCheck"]["approvedWordsCount"], 3);
        assert_eq!(json["wordCheck"]["wordsUsed"][0], "hello");
    }

    #[tokio::test]
    async fn target_lang_defaults_to_spanish() {
        let app = build_router(test_state(Some("hello my friend")));

        let response = app.oneshot(post(r#"{"text":"hola"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["targetLang"], "ES");
        assert_eq!(json["englishInput"], "[ES->EN] hola");
    }

    #[tokio::test]
    async fn generator_outage_still_answers() {
        let app = build_router(test_state(None));

        let response = app
            .oneshot(post(r#"{"text":"привет","targetLang":"RU"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["aiTextRaw"], "Error");
        assert_eq!(json["aiText"], "It seems there was a problem.");
    }

    #[tokio::test]
    async fn unsupported_language_rejected() {
        let app = build_router(test_state(Some("hello my friend")));

        let response = app
            .oneshot(post(r#"{"text":"bonjour","targetLang":"FR"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("FR"));
    }

    #[tokio::test]
    async fn english_target_rejected() {
        let app = build_router(test_state(Some("hello my friend")));

        let response = app
            .oneshot(post(r#"{"text":"hello","targetLang":"EN"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_text_rejected() {
        let app = build_router(test_state(Some("hello my friend")));

        let response = app.oneshot(post(r#"{"text":"   "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(json["error"], "text must not be empty");
    }

    #[tokio::test]
    async fn malformed_json_is_json_error() {
        let app = build_router(test_state(Some("hello my friend")));

        let response = app.oneshot(post(r#"{"txt":"hola"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn history_persists_across_requests() {
        let state = test_state(Some("hello my friend"));

        for text in ["uno", "dos", "tres"] {
            let app = build_router(state.clone());
            let body = format!(r#"{{"text":"{text}","targetLang":"ES"}}"#);
            let response = app.oneshot(post(&body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(state.tutor.history().await.len(), 6);
    }

    /// Generator whose task dies mid-request.
    struct PanickingGenerator;

    #[async_trait::async_trait]
    impl parley_core::Generator for PanickingGenerator {
        fn name(&self) -> &str {
            "panicking"
        }

        fn model(&self) -> &str {
            "panicking-model"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, parley_core::ProviderError> {
            panic!("model backend crashed");
        }
    }

    #[tokio::test]
    async fn pipeline_panic_is_500_and_relay_keeps_serving() {
        use crate::GatewayState;
        use crate::test_support::EchoTranslator;
        use parley_core::{ApprovedWords, Tutor};
        use std::sync::Arc;

        let tutor = Tutor::new(
            Arc::new(EchoTranslator),
            Arc::new(PanickingGenerator),
            Arc::new(ApprovedWords::from_words(vec!["hello".into()])),
        );
        let state = Arc::new(GatewayState::new(Arc::new(tutor), true));

        let response = build_router(state.clone())
            .oneshot(post(r#"{"text":"hola","targetLang":"ES"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert!(json["error"].is_string());

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = build_router(state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn internal_error_is_500() {
        let response = GatewayError::Internal("task panicked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
