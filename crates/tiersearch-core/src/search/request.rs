//! Search request types and argument validation
//!
//! `SearchRequest::from_arguments` is the only way untyped tool arguments
//! become a request; everything downstream works on the typed form.

use crate::error::{Result, TierSearchError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Caller-declared purpose of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    #[default]
    Research,
    Troubleshoot,
    Update,
}

impl Intent {
    pub const ALL: [Intent; 3] = [Intent::Research, Intent::Troubleshoot, Intent::Update];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Research => "research",
            Intent::Troubleshoot => "troubleshoot",
            Intent::Update => "update",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = TierSearchError;

    fn from_str(s: &str) -> Result<Self> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| {
                TierSearchError::InvalidArguments(format!(
                    "intent must be one of research, troubleshoot, update (got \"{}\")",
                    s
                ))
            })
    }
}

/// Starting point on the escalation ladder
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl Complexity {
    /// The escalation ladder, cheapest tier first
    pub const LADDER: [Complexity; 3] = [Complexity::Low, Complexity::Medium, Complexity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }

    /// Position of this tier on the ladder
    pub fn ladder_index(&self) -> usize {
        match self {
            Complexity::Low => 0,
            Complexity::Medium => 1,
            Complexity::High => 2,
        }
    }

    pub fn is_top(&self) -> bool {
        self.ladder_index() == Self::LADDER.len() - 1
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = TierSearchError;

    fn from_str(s: &str) -> Result<Self> {
        Complexity::LADDER
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| {
                TierSearchError::InvalidArguments(format!(
                    "complexity must be one of low, medium, high (got \"{}\")",
                    s
                ))
            })
    }
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub intent: Intent,
    pub complexity: Complexity,
}

impl SearchRequest {
    /// Build a request with default intent and complexity
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            intent: Intent::default(),
            complexity: Complexity::default(),
        }
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = intent;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    /// Validate untyped tool arguments
    ///
    /// Accepts an object with a non-empty string `query`, plus optional
    /// `intent` and `complexity` that must name a member of their enum when
    /// present. A present `null` counts as present. Unknown keys are ignored.
    pub fn from_arguments(args: &Value) -> Result<Self> {
        let obj = args.as_object().ok_or_else(|| {
            TierSearchError::InvalidArguments("arguments must be an object".to_string())
        })?;

        let query = match obj.get("query") {
            Some(Value::String(q)) if !q.is_empty() => q.clone(),
            Some(Value::String(_)) => {
                return Err(TierSearchError::InvalidArguments(
                    "query must not be empty".to_string(),
                ))
            }
            Some(_) => {
                return Err(TierSearchError::InvalidArguments(
                    "query must be a string".to_string(),
                ))
            }
            None => {
                return Err(TierSearchError::InvalidArguments(
                    "missing required field: query".to_string(),
                ))
            }
        };

        let intent = match obj.get("intent") {
            None => Intent::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(_) => {
                return Err(TierSearchError::InvalidArguments(
                    "intent must be a string".to_string(),
                ))
            }
        };

        let complexity = match obj.get("complexity") {
            None => Complexity::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(_) => {
                return Err(TierSearchError::InvalidArguments(
                    "complexity must be a string".to_string(),
                ))
            }
        };

        Ok(Self {
            query,
            intent,
            complexity,
        })
    }
}
