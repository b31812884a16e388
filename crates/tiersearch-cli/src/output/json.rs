//! JSON output formatter

use tiersearch_core::SearchAnswer;

pub fn format_answer(answer: &SearchAnswer) -> String {
    serde_json::to_string_pretty(answer).unwrap_or_else(|_| "{}".to_string()) + "\n"
}
