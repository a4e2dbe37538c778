//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod decision;
mod router;

// Re-export key types for convenience
pub use decision::DecisionAppState;
pub use decision::decision_router;
pub use router::{build_router, cors_layer};
