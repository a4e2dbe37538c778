//! HTTP DTOs for decision endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::choice::DecisionRecord;
use crate::ports::ProviderInfo;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to parse free text and decide.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseAndDecideRequest {
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// The decision with the options it was made between.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionResponse {
    pub option1: String,
    pub option2: String,
    pub conditions: String,
    pub decision: String,
    pub reason: String,
}

impl From<DecisionRecord> for DecisionResponse {
    fn from(record: DecisionRecord) -> Self {
        Self {
            option1: record.option1().to_string(),
            option2: record.option2().to_string(),
            conditions: record.conditions().to_string(),
            decision: record.decision().to_string(),
            reason: record.reason().to_string(),
        }
    }
}

/// Liveness report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub llm_provider: String,
    pub llm_model: String,
}

impl HealthResponse {
    pub fn healthy(service: &str, version: &str, provider: ProviderInfo) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            llm_provider: provider.name,
            llm_model: provider.model,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn invalid_body(rejection: impl std::fmt::Display) -> Self {
        Self::new(format!("invalid request body: {}", rejection))
    }

    pub fn internal(message: impl std::fmt::Display) -> Self {
        Self::new(format!("error while processing request: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::choice::{OptionsRecord, Side};

    #[test]
    fn decision_response_copies_every_field() {
        let record = DecisionRecord::for_side(
            OptionsRecord::new("tea", "coffee", "sleepy"),
            Side::Devil,
            "Caffeine!",
        );

        let response = DecisionResponse::from(record);

        assert_eq!(
            response,
            DecisionResponse {
                option1: "tea".to_string(),
                option2: "coffee".to_string(),
                conditions: "sleepy".to_string(),
                decision: "coffee".to_string(),
                reason: "Caffeine!".to_string(),
            }
        );
    }

    #[test]
    fn health_response_serializes_expected_keys() {
        let health = HealthResponse::healthy(
            "Decision Helper API",
            "1.0.0",
            ProviderInfo::new("openai-compatible", "gpt-3.5-turbo"),
        );

        let json = serde_json::to_value(&health).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "Decision Helper API");
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["llm_provider"], "openai-compatible");
        assert_eq!(json["llm_model"], "gpt-3.5-turbo");
    }

    #[test]
    fn error_response_prefixes_detail() {
        assert_eq!(
            ErrorResponse::internal("boom").detail,
            "error while processing request: boom"
        );
        assert_eq!(
            ErrorResponse::invalid_body("missing field `text`").detail,
            "invalid request body: missing field `text`"
        );
    }
}
