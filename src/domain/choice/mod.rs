//! Two-option choice domain.
//!
//! - `OptionsRecord` - two options plus conditions, always fully populated
//! - `DecisionRecord` - the chosen option and its reason; the choice is always one of the two
//! - `ExtractionReply` / `DecisionReply` - lenient-then-checked decoding of model output
//! - prompt templates for both stages

mod decision;
mod options;
mod prompts;
mod reply;

pub use decision::DecisionRecord;
pub use options::{OptionsRecord, Side, DEFAULT_OPTION1, DEFAULT_OPTION2};
pub use prompts::{
    decision_prompt, extraction_prompt, DECISION_SYSTEM_ROLE, EXTRACTION_SYSTEM_ROLE,
    FALLBACK_REASON,
};
pub use reply::{DecisionReply, ExtractionReply, ReplyError};
