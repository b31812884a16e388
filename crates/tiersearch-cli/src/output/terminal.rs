//! Terminal output formatter

use tiersearch_core::{AttemptOutcome, SearchAnswer};

pub fn format_answer(answer: &SearchAnswer) -> String {
    let mut output = String::new();

    output.push_str(answer.text.trim_end());
    output.push_str("\n\n");

    for attempt in &answer.attempts {
        let status = match &attempt.outcome {
            AttemptOutcome::Accepted => "accepted".to_string(),
            AttemptOutcome::Weak { reason } => format!("escalated: {}", reason),
            AttemptOutcome::Failed { error } => format!("failed: {}", error),
        };
        output.push_str(&format!(
            "-- {:<6} {:<20} {}\n",
            attempt.tier, attempt.model, status
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiersearch_core::{Complexity, CompletionAttempt};

    #[test]
    fn test_format_lists_attempts() {
        let answer = SearchAnswer {
            text: "Answer body\n".to_string(),
            tier: Complexity::Medium,
            model: "sonar-pro".to_string(),
            attempts: vec![
                CompletionAttempt {
                    tier_index: 0,
                    tier: Complexity::Low,
                    model: "sonar".to_string(),
                    outcome: AttemptOutcome::Weak {
                        reason: "answer has no line breaks".to_string(),
                    },
                },
                CompletionAttempt {
                    tier_index: 1,
                    tier: Complexity::Medium,
                    model: "sonar-pro".to_string(),
                    outcome: AttemptOutcome::Accepted,
                },
            ],
        };

        let output = format_answer(&answer);
        assert!(output.starts_with("Answer body\n\n"));
        assert!(output.contains("escalated: answer has no line breaks"));
        assert!(output.lines().last().unwrap().ends_with("accepted"));
    }
}
