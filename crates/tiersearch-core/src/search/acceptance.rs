//! Weak-answer detection
//!
//! A cheap local proxy for "the model did not really answer". Changing these
//! thresholds changes when the dispatcher escalates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an answer was judged weak
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeakSignal {
    /// Completion returned no content at all
    Empty,
    TooShort { chars: usize, min: usize },
    SingleLine,
    Phrase(String),
}

impl fmt::Display for WeakSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeakSignal::Empty => write!(f, "empty answer"),
            WeakSignal::TooShort { chars, min } => {
                write!(f, "answer too short ({} < {} chars)", chars, min)
            }
            WeakSignal::SingleLine => write!(f, "answer has no line breaks"),
            WeakSignal::Phrase(p) => write!(f, "answer contains \"{}\"", p),
        }
    }
}

/// Thresholds for the weak-answer heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceHeuristic {
    /// Minimum answer length, counted in Unicode scalar values (not UTF-16
    /// units), so astral-plane text such as emoji counts one per symbol
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,

    /// Reject answers without any line break
    #[serde(default = "default_require_line_break")]
    pub require_line_break: bool,

    /// Substrings that mark an answer as a non-answer
    #[serde(default = "default_weak_phrases")]
    pub weak_phrases: Vec<String>,
}

impl Default for AcceptanceHeuristic {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            require_line_break: default_require_line_break(),
            weak_phrases: default_weak_phrases(),
        }
    }
}

fn default_min_chars() -> usize {
    200
}

fn default_require_line_break() -> bool {
    true
}

fn default_weak_phrases() -> Vec<String> {
    vec!["I apologize".to_string(), "I'm not sure".to_string()]
}

impl AcceptanceHeuristic {
    /// First weak signal present in `answer`, if any
    pub fn weakness(&self, answer: &str) -> Option<WeakSignal> {
        let chars = answer.chars().count();
        if chars < self.min_chars {
            return Some(WeakSignal::TooShort {
                chars,
                min: self.min_chars,
            });
        }

        if self.require_line_break && !answer.contains('\n') {
            return Some(WeakSignal::SingleLine);
        }

        self.weak_phrases
            .iter()
            .find(|phrase| answer.contains(phrase.as_str()))
            .map(|phrase| WeakSignal::Phrase(phrase.clone()))
    }

    pub fn is_acceptable(&self, answer: &str) -> bool {
        self.weakness(answer).is_none()
    }
}
