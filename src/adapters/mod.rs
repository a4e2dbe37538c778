//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI-compatible provider and a configurable mock
//! - `http` - Axum routes, CORS and request tracing

pub mod ai;
pub mod http;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use http::{build_router, DecisionAppState};
