//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `choice` - Options and decision records, model-reply parsing, prompts

pub mod choice;
