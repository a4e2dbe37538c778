//! ParseAndDecideHandler - Command handler running the full two-stage pipeline.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{info, info_span, Instrument};

use crate::domain::choice::DecisionRecord;
use crate::ports::{AIProvider, RequestMetadata};

use super::errors::ParseAndDecideError;
use super::extract_options::OptionExtractor;
use super::make_decision::DecisionMaker;

/// Command to turn free text into a decision.
#[derive(Debug, Clone)]
pub struct ParseAndDecideCommand {
    pub text: String,
}

impl ParseAndDecideCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Handler for the parse-and-decide pipeline.
///
/// Cheap to clone; both stages are shared.
#[derive(Clone)]
pub struct ParseAndDecideHandler {
    extractor: Arc<OptionExtractor>,
    decision_maker: Arc<DecisionMaker>,
}

impl ParseAndDecideHandler {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self::with_stages(
            OptionExtractor::new(ai_provider.clone()),
            DecisionMaker::new(ai_provider),
        )
    }

    pub fn with_stages(extractor: OptionExtractor, decision_maker: DecisionMaker) -> Self {
        Self {
            extractor: Arc::new(extractor),
            decision_maker: Arc::new(decision_maker),
        }
    }

    pub async fn handle(
        &self,
        cmd: ParseAndDecideCommand,
    ) -> Result<DecisionRecord, ParseAndDecideError> {
        // 1. Validate input before any outbound call
        if cmd.text.trim().is_empty() {
            return Err(ParseAndDecideError::EmptyInput);
        }

        let metadata = RequestMetadata::generate();
        let span = info_span!("parse_and_decide", trace_id = %metadata.trace_id);

        // 2. Extract, then 3. decide. A panic anywhere in the stages is an
        // internal error, not a dropped connection.
        let pipeline = async {
            let options = self.extractor.extract(&cmd.text, &metadata).await;
            let record = self.decision_maker.decide(options, &metadata).await;
            info!(decision = %record.decision(), "Decision made");
            record
        };

        AssertUnwindSafe(pipeline)
            .catch_unwind()
            .instrument(span)
            .await
            .map_err(|payload| ParseAndDecideError::Internal(panic_message(payload.as_ref())))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected internal error".to_string()
    }
}
