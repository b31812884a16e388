//! Tiersearch Core Library
//!
//! Core functionality for the tiersearch escalating search tool.
//!
//! # Features
//! - Strict validation of untyped tool arguments
//! - Intent-specific system instructions and per-tier model bindings
//! - Escalation across low/medium/high model tiers driven by a weak-answer heuristic
//! - OpenAI-compatible chat completion client

pub mod config;
pub mod error;
pub mod llm;
pub mod search;

pub use config::{Config, ServiceConfig, API_KEY_ENV};
pub use error::{Error, Result, TierSearchError};
pub use llm::{ChatMessage, CompletionClient, CompletionRequest, HttpCompletionClient};
pub use search::{
    instruction_for, AcceptanceHeuristic, AttemptOutcome, Complexity, CompletionAttempt,
    EscalatingDispatcher, Intent, ModelBindings, SearchAnswer, SearchRequest, WeakSignal,
};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "tiersearch";
