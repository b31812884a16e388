//! Search dispatch
//!
//! Provides:
//! - Argument validation into a typed `SearchRequest`
//! - Intent instructions and tier-to-model bindings
//! - The weak-answer heuristic
//! - The escalating dispatcher that ties them together

mod acceptance;
mod dispatcher;
mod profile;
mod request;

pub use acceptance::{AcceptanceHeuristic, WeakSignal};
pub use dispatcher::{AttemptOutcome, CompletionAttempt, EscalatingDispatcher, SearchAnswer};
pub use profile::{default_model_for, instruction_for, ModelBindings};
pub use request::{Complexity, Intent, SearchRequest};
