//! DecisionMaker - picks one of the two options and explains why.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use crate::domain::choice::{
    decision_prompt, DecisionRecord, DecisionReply, OptionsRecord, Side, DECISION_SYSTEM_ROLE,
    FALLBACK_REASON,
};
use crate::ports::{AIProvider, CompletionRequest, RequestMetadata};

use super::errors::StageError;

/// Picks a side when the model gave no usable answer.
pub type SidePicker = fn() -> Side;

/// Uniformly random side.
pub fn random_side() -> Side {
    if rand::thread_rng().gen_bool(0.5) {
        Side::Angel
    } else {
        Side::Devil
    }
}

/// Second pipeline stage. Never fails.
///
/// - a model decision naming neither option is coerced to option 1
/// - any upstream or parsing failure picks a side via the picker and uses
///   [`FALLBACK_REASON`]
pub struct DecisionMaker {
    ai_provider: Arc<dyn AIProvider>,
    picker: SidePicker,
}

impl DecisionMaker {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            picker: random_side,
        }
    }

    /// Replaces the random fallback picker.
    pub fn with_picker(mut self, picker: SidePicker) -> Self {
        self.picker = picker;
        self
    }

    /// Asks the model for a decision, surfacing why that did not work.
    ///
    /// The coercion to option 1 is applied here; it is not a failure.
    pub async fn try_decide(
        &self,
        options: &OptionsRecord,
        metadata: &RequestMetadata,
    ) -> Result<DecisionRecord, StageError> {
        let request = CompletionRequest::new(
            DECISION_SYSTEM_ROLE,
            decision_prompt(options),
            metadata.clone(),
        );

        let response = self.ai_provider.complete(request).await?;
        let reply = DecisionReply::parse(&response.content)?;

        let (record, coerced) =
            DecisionRecord::coerced(options.clone(), reply.decision.as_deref(), reply.reason);
        if coerced {
            debug!(
                trace_id = %metadata.trace_id,
                returned = ?reply.decision,
                "Model decision matched neither option, using option1"
            );
        }

        Ok(record)
    }

    /// Decides, degrading to a picked side and the fallback reason on any failure.
    pub async fn decide(
        &self,
        options: OptionsRecord,
        metadata: &RequestMetadata,
    ) -> DecisionRecord {
        match self.try_decide(&options, metadata).await {
            Ok(record) => record,
            Err(e) => {
                let side = (self.picker)();
                warn!(
                    trace_id = %metadata.trace_id,
                    error = %e,
                    ?side,
                    "Decision failed, picking an option without the model"
                );
                DecisionRecord::for_side(options, side, FALLBACK_REASON)
            }
        }
    }
}
