//! The final decision record.

use super::options::{OptionsRecord, Side};

/// A chosen option with its justification.
///
/// `decision` always equals `option1` or `option2`; the only ways to build
/// one establish that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRecord {
    option1: String,
    option2: String,
    conditions: String,
    decision: String,
    reason: String,
}

impl DecisionRecord {
    /// Builds a record choosing the option on `side`.
    pub fn for_side(options: OptionsRecord, side: Side, reason: impl Into<String>) -> Self {
        let decision = options.option(side).to_string();
        Self {
            option1: options.option1,
            option2: options.option2,
            conditions: options.conditions,
            decision,
            reason: reason.into(),
        }
    }

    /// Builds a record from an untrusted decision, coercing anything that is
    /// not exactly one of the options to option 1. `None` stands for a decision
    /// that was not text at all.
    ///
    /// Returns the record and whether coercion happened.
    pub fn coerced(
        options: OptionsRecord,
        decision: Option<&str>,
        reason: impl Into<String>,
    ) -> (Self, bool) {
        match decision.and_then(|d| options.side_of(d)) {
            Some(side) => (Self::for_side(options, side, reason), false),
            None => (Self::for_side(options, Side::Angel, reason), true),
        }
    }

    pub fn option1(&self) -> &str {
        &self.option1
    }

    pub fn option2(&self) -> &str {
        &self.option2
    }

    pub fn conditions(&self) -> &str {
        &self.conditions
    }

    pub fn decision(&self) -> &str {
        &self.decision
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Side of the chosen option.
    pub fn side(&self) -> Side {
        if self.decision == self.option1 {
            Side::Angel
        } else {
            Side::Devil
        }
    }
}
