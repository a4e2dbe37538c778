//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod decision;

pub use decision::{
    DecisionMaker, OptionExtractor, ParseAndDecideCommand, ParseAndDecideError,
    ParseAndDecideHandler, StageError,
};
