//! The two-option record produced by extraction.

/// Placeholder used when the first option cannot be extracted.
pub const DEFAULT_OPTION1: &str = "option1";

/// Placeholder used when the second option cannot be extracted.
pub const DEFAULT_OPTION2: &str = "option2";

/// Which of the two options. Option 1 is framed as the angel, option 2 as the devil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Angel,
    Devil,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Angel, Side::Devil];
}

/// Two options plus the objective conditions around them.
///
/// Every field is always populated; degraded extraction substitutes defaults
/// rather than leaving anything absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsRecord {
    pub option1: String,
    pub option2: String,
    pub conditions: String,
}

impl OptionsRecord {
    pub fn new(
        option1: impl Into<String>,
        option2: impl Into<String>,
        conditions: impl Into<String>,
    ) -> Self {
        Self {
            option1: option1.into(),
            option2: option2.into(),
            conditions: conditions.into(),
        }
    }

    /// Record used when extraction fails: placeholder options, the raw text as conditions.
    pub fn fallback(raw_input: &str) -> Self {
        Self::new(DEFAULT_OPTION1, DEFAULT_OPTION2, raw_input)
    }

    /// Text of the option on the given side.
    pub fn option(&self, side: Side) -> &str {
        match side {
            Side::Angel => &self.option1,
            Side::Devil => &self.option2,
        }
    }

    /// Finds which side `candidate` names, by exact string equality.
    ///
    /// When both options are identical the angel side wins.
    pub fn side_of(&self, candidate: &str) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|side| self.option(*side) == candidate)
    }
}
