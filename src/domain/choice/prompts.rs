//! Prompt templates for the two pipeline stages.

use super::options::OptionsRecord;

/// System role for option extraction.
pub const EXTRACTION_SYSTEM_ROLE: &str =
    "You are a text-analysis assistant specialized in extracting options and conditions.";

/// System role for decision making.
pub const DECISION_SYSTEM_ROLE: &str =
    "You are a playful decision assistant who gives advice in a cartoon-style tone.";

/// Reason given when the decision stage has to pick on its own.
pub const FALLBACK_REASON: &str =
    "Oops, a small hiccup occurred while thinking — going with this one!";

/// Returns the user prompt asking the model to split `text` into two options and conditions.
pub fn extraction_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following text and extract the two options being weighed, plus any objective conditions that apply.
Text: "{}"

Reply with ONLY a JSON object in exactly this format, with no extra content:
{{
    "option1": "the first option",
    "option2": "the second option",
    "conditions": "the objective conditions you extracted"
}}

If the two options are not stated explicitly, split the text into two plausible options as best you can."#,
        text
    )
}

/// Returns the user prompt asking the model to pick between the angel and devil options.
pub fn decision_prompt(options: &OptionsRecord) -> String {
    format!(
        r#"Make a decision between the following two options, taking the objective conditions into account.
Option 1 (angel): {}
Option 2 (devil): {}
Conditions: {}

Reply with ONLY a JSON object in exactly this format, with no extra content:
{{
    "decision": "the chosen option (must be exactly the text of option 1 or option 2)",
    "reason": "why you chose it, in a lighthearted cartoon style, not too long"
}}

Keep the reason fun and cartoon-like, for example:
- The angel says this one is healthier~
- The devil thinks this one is way more fun!
- A little bit naughty, but let's go with this one!
- Address the user with a playful nickname and avoid being too serious"#,
        options.option1, options.option2, options.conditions
    )
}
