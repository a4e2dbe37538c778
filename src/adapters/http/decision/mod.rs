//! HTTP adapter for decision endpoints.
//!
//! Exposes the decision pipeline via REST API:
//! - `GET /health` - Liveness and provider report
//! - `POST /api/parse-and-decide` - Extract two options from text and pick one

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{DecisionResponse, ErrorResponse, HealthResponse, ParseAndDecideRequest};
pub use handlers::DecisionAppState;
pub use routes::decision_router;
