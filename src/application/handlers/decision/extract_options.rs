//! OptionExtractor - turns free text into an options record.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::choice::{
    extraction_prompt, ExtractionReply, OptionsRecord, EXTRACTION_SYSTEM_ROLE,
};
use crate::ports::{AIProvider, CompletionRequest, RequestMetadata};

use super::errors::StageError;

/// First pipeline stage. Never fails: any upstream or parsing problem yields
/// placeholder options with the raw text kept as conditions.
pub struct OptionExtractor {
    ai_provider: Arc<dyn AIProvider>,
}

impl OptionExtractor {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    /// Asks the model for the options, surfacing why that did not work.
    pub async fn try_extract(
        &self,
        text: &str,
        metadata: &RequestMetadata,
    ) -> Result<OptionsRecord, StageError> {
        let request = CompletionRequest::new(
            EXTRACTION_SYSTEM_ROLE,
            extraction_prompt(text),
            metadata.clone(),
        );

        let response = self.ai_provider.complete(request).await?;
        let reply = ExtractionReply::parse(&response.content)?;

        Ok(reply.into_options())
    }

    /// Extracts options, degrading to `OptionsRecord::fallback` on any failure.
    pub async fn extract(&self, text: &str, metadata: &RequestMetadata) -> OptionsRecord {
        match self.try_extract(text, metadata).await {
            Ok(options) => {
                debug!(
                    trace_id = %metadata.trace_id,
                    option1 = %options.option1,
                    option2 = %options.option2,
                    "Extracted options"
                );
                options
            }
            Err(e) => {
                warn!(
                    trace_id = %metadata.trace_id,
                    error = %e,
                    "Option extraction failed, using placeholder options"
                );
                OptionsRecord::fallback(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::AIError;

    const INPUT: &str = "pizza or salad for dinner, I'm on a budget";

    fn metadata() -> RequestMetadata {
        RequestMetadata::new("trace-extract")
    }

    #[tokio::test]
    async fn extracts_options_from_valid_reply() {
        let provider = Arc::new(MockAIProvider::new().with_response(
            r#"{"option1": "pizza", "option2": "salad", "conditions": "on a budget"}"#,
        ));
        let extractor = OptionExtractor::new(provider.clone());

        let options = extractor.extract(INPUT, &metadata()).await;

        assert_eq!(options, OptionsRecord::new("pizza", "salad", "on a budget"));

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt, EXTRACTION_SYSTEM_ROLE);
        assert!(calls[0].user_prompt.contains(INPUT));
        assert_eq!(calls[0].metadata.trace_id, "trace-extract");
    }

    #[tokio::test]
    async fn missing_keys_take_defaults() {
        let provider = Arc::new(MockAIProvider::new().with_response(r#"{"option1": "pizza"}"#));
        let extractor = OptionExtractor::new(provider);

        let options = extractor.extract(INPUT, &metadata()).await;

        assert_eq!(options, OptionsRecord::new("pizza", "option2", ""));
    }

    #[tokio::test]
    async fn invalid_json_falls_back_to_raw_text() {
        let provider =
            Arc::new(MockAIProvider::new().with_response("I think it's pizza vs salad!"));
        let extractor = OptionExtractor::new(provider);

        let err = extractor.try_extract(INPUT, &metadata()).await.unwrap_err();
        assert!(matches!(err, StageError::Malformed(_)));

        let provider =
            Arc::new(MockAIProvider::new().with_response("I think it's pizza vs salad!"));
        let options = OptionExtractor::new(provider).extract(INPUT, &metadata()).await;
        assert_eq!(options, OptionsRecord::fallback(INPUT));
    }

    #[tokio::test]
    async fn null_field_falls_back_to_raw_text() {
        let provider = Arc::new(MockAIProvider::new().with_response(
            r#"{"option1": null, "option2": "salad", "conditions": "x"}"#,
        ));
        let extractor = OptionExtractor::new(provider);

        let options = extractor.extract("pizza or salad", &metadata()).await;

        assert_eq!(options, OptionsRecord::fallback("pizza or salad"));
    }

    #[tokio::test]
    async fn upstream_failure_falls_back_to_raw_text() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::Timeout {
            timeout_secs: 30,
        }));
        let extractor = OptionExtractor::new(provider.clone());

        let options = extractor.extract(INPUT, &metadata()).await;

        assert_eq!(options.option1, "option1");
        assert_eq!(options.option2, "option2");
        assert_eq!(options.conditions, INPUT);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn try_extract_reports_upstream_errors() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::AuthenticationFailed));
        let extractor = OptionExtractor::new(provider);

        let err = extractor.try_extract(INPUT, &metadata()).await.unwrap_err();

        assert!(matches!(
            err,
            StageError::Upstream(AIError::AuthenticationFailed)
        ));
    }
}
