//! Angel/Devil - Whimsical two-option decision service
//!
//! This crate turns free text describing a choice between two options into a
//! decision with a playful justification, delegating both reasoning steps to an
//! OpenAI-compatible chat completion service.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
