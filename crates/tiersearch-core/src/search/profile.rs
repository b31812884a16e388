//! Intent instructions and tier-to-model bindings

use super::{Complexity, Intent};
use serde::{Deserialize, Serialize};

const RESEARCH_INSTRUCTION: &str = "You are a research assistant with live web access. \
Answer the question thoroughly and accurately, organise the answer into short sections \
or bullet points, and cite the sources you relied on. Prefer primary sources and \
official documentation over commentary.";

const TROUBLESHOOT_INSTRUCTION: &str = "You are a senior engineer helping debug a problem. \
Identify the most likely causes first, then give concrete step-by-step fixes with \
commands or code where relevant. Mention known issues, version-specific pitfalls and \
links to the relevant bug reports or documentation.";

const UPDATE_INSTRUCTION: &str = "You are tracking the latest developments on a topic. \
Focus on the most recent releases, announcements and changes, include dates and version \
numbers, and call out anything deprecated or breaking. Cite the sources for each item.";

/// System instruction steering the model for an intent
pub fn instruction_for(intent: Intent) -> &'static str {
    match intent {
        Intent::Research => RESEARCH_INSTRUCTION,
        Intent::Troubleshoot => TROUBLESHOOT_INSTRUCTION,
        Intent::Update => UPDATE_INSTRUCTION,
    }
}

/// Built-in model identifier for a tier
pub fn default_model_for(tier: Complexity) -> &'static str {
    match tier {
        Complexity::Low => "sonar",
        Complexity::Medium => "sonar-pro",
        Complexity::High => "sonar-reasoning-pro",
    }
}

/// Remote model bound to each complexity tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelBindings {
    #[serde(default = "default_low")]
    pub low: String,

    #[serde(default = "default_medium")]
    pub medium: String,

    #[serde(default = "default_high")]
    pub high: String,
}

impl ModelBindings {
    pub fn model_for(&self, tier: Complexity) -> &str {
        match tier {
            Complexity::Low => &self.low,
            Complexity::Medium => &self.medium,
            Complexity::High => &self.high,
        }
    }
}

impl Default for ModelBindings {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
        }
    }
}

fn default_low() -> String {
    default_model_for(Complexity::Low).to_string()
}

fn default_medium() -> String {
    default_model_for(Complexity::Medium).to_string()
}

fn default_high() -> String {
    default_model_for(Complexity::High).to_string()
}
