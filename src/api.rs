//! HTTP surface: `GET /` renders a badge, `GET /health` is a liveness probe.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::badge::{self, BadgeRequest, Template};
use crate::render;
use crate::search::SearchBackend;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn SearchBackend>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BadgeParams {
    style: Option<String>,
    q: Option<String>,
    label: Option<String>,
    suffix: Option<String>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(render_badge))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Always answers 200 with a badge; backend failures are communicated
/// visually, since the typical consumer is an `<img>` tag with no
/// error-handling UI. Only a renderer fault turns into a 500.
async fn render_badge(
    State(state): State<AppState>,
    Query(params): Query<BadgeParams>,
) -> Response {
    let request = BadgeRequest {
        template: Template::from_param(params.style.as_deref()),
        search_query: params.q,
        label: params.label,
        suffix: params.suffix,
    };

    let options = badge::decide(state.backend.as_ref(), &request).await;

    match render::render_svg(&options) {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(e) => {
            error!(error = %e, "badge rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}
