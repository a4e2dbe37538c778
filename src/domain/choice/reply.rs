//! Parsing of raw model replies.
//!
//! Model output is untrusted. Replies are decoded into structures whose
//! fields are all optional, then defaults or requirements are applied
//! field by field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use super::options::{OptionsRecord, DEFAULT_OPTION1, DEFAULT_OPTION2};

/// The model's reply could not be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplyError {
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("reply is not a JSON object")]
    NotAnObject,

    #[error("reply has an invalid structure: {0}")]
    InvalidStructure(String),

    #[error("reply is missing field '{0}'")]
    MissingField(&'static str),
}

/// Extraction reply with every key optional.
///
/// An absent key is `None`. A present key must hold a string, so `null` or any
/// other value fails the whole reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractionReply {
    #[serde(default, deserialize_with = "present_string")]
    pub option1: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub option2: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub conditions: Option<String>,
}

impl ExtractionReply {
    /// Parses the reply strictly as a JSON object.
    pub fn parse(raw: &str) -> Result<Self, ReplyError> {
        parse_object(raw)
    }

    /// Substitutes `"option1"`, `"option2"` and `""` for missing keys.
    pub fn into_options(self) -> OptionsRecord {
        OptionsRecord::new(
            self.option1.unwrap_or_else(|| DEFAULT_OPTION1.to_string()),
            self.option2.unwrap_or_else(|| DEFAULT_OPTION2.to_string()),
            self.conditions.unwrap_or_default(),
        )
    }
}

/// Decision reply. Both keys are required once parsing succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionReply {
    /// `None` when the key held something other than a string. Such a
    /// decision names neither option.
    pub decision: Option<String>,
    pub reason: String,
}

#[derive(Deserialize)]
struct PartialDecisionReply {
    #[serde(default, deserialize_with = "present_value")]
    decision: Option<Value>,
    #[serde(default, deserialize_with = "present_string")]
    reason: Option<String>,
}

impl DecisionReply {
    /// Parses the reply strictly as a JSON object holding `decision` and `reason`.
    pub fn parse(raw: &str) -> Result<Self, ReplyError> {
        let partial: PartialDecisionReply = parse_object(raw)?;
        let decision = match partial.decision {
            Some(Value::String(decision)) => Some(decision),
            Some(_) => None,
            None => return Err(ReplyError::MissingField("decision")),
        };
        Ok(Self {
            decision,
            reason: partial.reason.ok_or(ReplyError::MissingField("reason"))?,
        })
    }
}

/// A present key must be a string; `null` is not treated as absent.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Keeps a present `null` as `Value::Null` instead of folding it into `None`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Decodes `raw` as a JSON object into `T`.
///
/// Going through `Value` first keeps arrays from being accepted as structs.
fn parse_object<T: DeserializeOwned>(raw: &str) -> Result<T, ReplyError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ReplyError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(ReplyError::NotAnObject);
    }
    serde_json::from_value(value).map_err(|e| ReplyError::InvalidStructure(e.to_string()))
}
