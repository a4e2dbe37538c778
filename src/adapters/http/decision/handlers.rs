//! HTTP handlers for decision endpoints
//!
//! These handlers connect Axum routes to the parse-and-decide command handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::application::handlers::decision::{
    ParseAndDecideCommand, ParseAndDecideError, ParseAndDecideHandler,
};
use crate::config::AppInfoConfig;
use crate::ports::AIProvider;

use super::dto::{DecisionResponse, ErrorResponse, HealthResponse, ParseAndDecideRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct DecisionAppState {
    pub ai_provider: Arc<dyn AIProvider>,
    pub handler: ParseAndDecideHandler,
    pub service: Arc<str>,
    pub version: Arc<str>,
}

impl DecisionAppState {
    pub fn new(ai_provider: Arc<dyn AIProvider>, app: &AppInfoConfig) -> Self {
        Self {
            handler: ParseAndDecideHandler::new(ai_provider.clone()),
            ai_provider,
            service: Arc::from(app.title.as_str()),
            version: Arc::from(app.version.as_str()),
        }
    }

    /// Swaps in a pre-built pipeline handler.
    pub fn with_handler(mut self, handler: ParseAndDecideHandler) -> Self {
        self.handler = handler;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Liveness check
///
/// GET /health
pub async fn health(State(state): State<DecisionAppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        &state.service,
        &state.version,
        state.ai_provider.provider_info(),
    ))
}

/// Extract two options from free text and pick one
///
/// POST /api/parse-and-decide
pub async fn parse_and_decide(
    State(state): State<DecisionAppState>,
    payload: Result<Json<ParseAndDecideRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::invalid_body(rejection.body_text())),
            )
                .into_response();
        }
    };

    match state.handler.handle(ParseAndDecideCommand::new(req.text)).await {
        Ok(record) => (StatusCode::OK, Json(DecisionResponse::from(record))).into_response(),
        Err(e) => handle_error(e),
    }
}

fn handle_error(e: ParseAndDecideError) -> Response {
    match e {
        ParseAndDecideError::EmptyInput => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
        ParseAndDecideError::Internal(message) => {
            error!(error = %message, "Parse-and-decide failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(message)),
            )
                .into_response()
        }
    }
}
