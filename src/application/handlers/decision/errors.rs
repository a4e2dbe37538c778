//! Error types for the decision pipeline.

use thiserror::Error;

use crate::domain::choice::ReplyError;
use crate::ports::AIError;

/// Why a single stage could not use the model's answer.
///
/// Both kinds are absorbed by the stage's fallback; they never reach the caller.
#[derive(Debug, Error)]
pub enum StageError {
    /// The text-generation call itself failed (network, timeout, non-2xx).
    #[error("upstream error: {0}")]
    Upstream(#[from] AIError),

    /// The call succeeded but the reply was unusable.
    #[error("malformed response: {0}")]
    Malformed(#[from] ReplyError),
}

/// Errors surfaced by the parse-and-decide pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAndDecideError {
    /// Input text was empty or whitespace only.
    #[error("input text must not be empty")]
    EmptyInput,

    /// Unexpected fault while processing.
    #[error("{0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_error_wraps_sources() {
        let upstream: StageError = AIError::network("refused").into();
        assert_eq!(upstream.to_string(), "upstream error: network error: refused");

        let malformed: StageError = ReplyError::NotAnObject.into();
        assert_eq!(
            malformed.to_string(),
            "malformed response: reply is not a JSON object"
        );
    }

    #[test]
    fn pipeline_error_messages() {
        assert_eq!(
            ParseAndDecideError::EmptyInput.to_string(),
            "input text must not be empty"
        );
        assert_eq!(
            ParseAndDecideError::Internal("boom".to_string()).to_string(),
            "boom"
        );
    }
}
