//! The browser practice page.
//!
//! The page listens with the browser's speech recognition in the chosen
//! practice language (HE, ES, or RU), posts the transcript to
//! `/api/process-speech`, and reads `aiTextX` back with speech synthesis at
//! the selected speed. Its three files from `frontend/` are baked in with
//! `include_str!`, so `parley serve` needs nothing on disk but the word list.

use axum::{
    Router,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};

const INDEX_HTML: &str = include_str!("../../../frontend/index.html");
const STYLE_CSS: &str = include_str!("../../../frontend/style.css");
const APP_JS: &str = include_str!("../../../frontend/app.js");

/// `/practice` plus the two static assets it links.
pub fn frontend_router() -> Router {
    Router::new()
        .route("/practice", get(index_handler))
        .route("/static/style.css", get(css_handler))
        .route("/static/app.js", get(js_handler))
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn css_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLE_CSS,
    )
        .into_response()
}

async fn js_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
        .into_response()
}
