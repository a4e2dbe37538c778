//! Decision pipeline handlers.
//!
//! - `OptionExtractor` - free text to options record
//! - `DecisionMaker` - options record to decision record
//! - `ParseAndDecideHandler` - validates input and runs both stages in sequence

mod errors;
mod extract_options;
mod make_decision;
mod parse_and_decide;

pub use errors::{ParseAndDecideError, StageError};
pub use extract_options::OptionExtractor;
pub use make_decision::{random_side, DecisionMaker, SidePicker};
pub use parse_and_decide::{ParseAndDecideCommand, ParseAndDecideHandler};
