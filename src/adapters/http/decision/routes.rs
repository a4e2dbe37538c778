//! Route definitions for decision endpoints

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, parse_and_decide, DecisionAppState};

/// Create decision router with all endpoints
///
/// # Endpoints
///
/// - `GET /health` - Liveness and provider report
/// - `POST /api/parse-and-decide` - Extract two options and pick one
pub fn decision_router() -> Router<DecisionAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/parse-and-decide", post(parse_and_decide))
}
