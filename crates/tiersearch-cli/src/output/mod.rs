//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use tiersearch_core::SearchAnswer;

/// Format an accepted answer
pub fn format_answer(answer: &SearchAnswer, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_answer(answer),
        OutputFormat::Cli => terminal::format_answer(answer),
    }
}
