//! Escalating query dispatcher
//!
//! Walks the complexity ladder upward from the requested tier, one remote
//! call per tier, until an answer passes the acceptance heuristic. The top
//! tier's answer is always taken as-is. Escalation never moves down, never
//! skips and never repeats a tier, so a request costs at most
//! `Complexity::LADDER.len()` calls.

use super::{instruction_for, AcceptanceHeuristic, Complexity, ModelBindings, SearchRequest};
use crate::config::{Config, DEFAULT_MAX_TOKENS};
use crate::error::{Result, TierSearchError};
use crate::llm::{ChatMessage, CompletionClient, CompletionRequest};
use serde::Serialize;
use std::sync::Arc;

/// What happened at one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Accepted,
    Weak { reason: String },
    Failed { error: String },
}

/// Diagnostic record of one remote call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionAttempt {
    pub tier_index: usize,
    pub tier: Complexity,
    pub model: String,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Accepted answer plus the trail that led to it
#[derive(Debug, Clone, Serialize)]
pub struct SearchAnswer {
    pub text: String,
    pub tier: Complexity,
    pub model: String,
    pub attempts: Vec<CompletionAttempt>,
}

impl SearchAnswer {
    /// Number of tiers tried above the requested one
    pub fn escalations(&self) -> usize {
        self.attempts.len().saturating_sub(1)
    }
}

/// Dispatches search requests across the model tier ladder
pub struct EscalatingDispatcher {
    client: Arc<dyn CompletionClient>,
    models: ModelBindings,
    heuristic: AcceptanceHeuristic,
    max_tokens: u32,
}

impl EscalatingDispatcher {
    /// Create dispatcher with default models and thresholds
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            models: ModelBindings::default(),
            heuristic: AcceptanceHeuristic::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Create dispatcher from loaded configuration
    pub fn from_config(client: Arc<dyn CompletionClient>, config: &Config) -> Self {
        Self {
            client,
            models: config.service.models.clone(),
            heuristic: config.acceptance.clone(),
            max_tokens: config.service.max_tokens,
        }
    }

    /// Produce the cheapest acceptable answer for `request`
    pub async fn dispatch(&self, request: &SearchRequest) -> Result<SearchAnswer> {
        let instruction = instruction_for(request.intent);
        let start = request.complexity.ladder_index();
        let mut attempts: Vec<CompletionAttempt> = Vec::new();

        for (tier_index, tier) in Complexity::LADDER.iter().copied().enumerate().skip(start) {
            let is_last = tier.is_top();
            let model = self.models.model_for(tier).to_string();

            tracing::debug!(
                tier = %tier,
                model = %model,
                intent = %request.intent,
                "Dispatching completion"
            );

            let completion = CompletionRequest {
                model: model.clone(),
                messages: vec![
                    ChatMessage::system(instruction),
                    ChatMessage::user(request.query.as_str()),
                ],
                max_tokens: self.max_tokens,
            };

            let mut attempt = CompletionAttempt {
                tier_index,
                tier,
                model,
                outcome: AttemptOutcome::Accepted,
            };

            let reply = self
                .client
                .chat_completion(completion)
                .await
                .map(|text| text.filter(|t| !t.is_empty()));

            let text = match reply {
                Err(e) if is_last => {
                    tracing::warn!(tier = %tier, "Top tier failed: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(tier = %tier, "Tier failed, escalating: {}", e);
                    attempt.outcome = AttemptOutcome::Failed {
                        error: e.to_string(),
                    };
                    attempts.push(attempt);
                    continue;
                }
                Ok(None) => {
                    tracing::warn!(tier = %tier, "Tier returned no content");
                    attempt.outcome = AttemptOutcome::Weak {
                        reason: super::WeakSignal::Empty.to_string(),
                    };
                    attempts.push(attempt);
                    continue;
                }
                Ok(Some(text)) => text,
            };

            if !is_last {
                if let Some(signal) = self.heuristic.weakness(&text) {
                    tracing::warn!(tier = %tier, "Weak answer ({}), escalating", signal);
                    attempt.outcome = AttemptOutcome::Weak {
                        reason: signal.to_string(),
                    };
                    attempts.push(attempt);
                    continue;
                }
            }

            tracing::info!(
                tier = %tier,
                model = %attempt.model,
                escalations = attempts.len(),
                "Answer accepted"
            );

            let model = attempt.model.clone();
            attempts.push(attempt);
            return Ok(SearchAnswer {
                text,
                tier,
                model,
                attempts,
            });
        }

        Err(TierSearchError::Exhausted {
            attempts: attempts.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Intent;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned outcomes in order and records every request
    struct ScriptedClient {
        script: Mutex<VecDeque<Result<Option<String>>>>,
        calls: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<Option<String>>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn models_called(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.model.clone())
                .collect()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn chat_completion(&self, request: CompletionRequest) -> Result<Option<String>> {
            self.calls.lock().unwrap().push(request);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("client called more times than scripted")
        }
    }

    fn strong() -> Result<Option<String>> {
        Ok(Some(format!(
            "## Answer\n{}",
            "A thorough explanation with sources. ".repeat(8)
        )))
    }

    fn weak() -> Result<Option<String>> {
        Ok(Some("x".repeat(50)))
    }

    fn transport_error() -> Result<Option<String>> {
        Err(TierSearchError::ExternalError(
            "Completion service error (HTTP 503): overloaded".to_string(),
        ))
    }

    fn dispatcher(client: &Arc<ScriptedClient>) -> EscalatingDispatcher {
        EscalatingDispatcher::new(client.clone())
    }

    #[tokio::test]
    async fn test_defaults_use_research_instruction_and_medium_tier() {
        let client = ScriptedClient::new(vec![strong()]);
        let answer = dispatcher(&client)
            .dispatch(&SearchRequest::new("what is tokio"))
            .await
            .unwrap();

        assert_eq!(answer.tier, Complexity::Medium);
        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "sonar-pro");
        assert_eq!(calls[0].max_tokens, 4000);
        assert_eq!(
            calls[0].messages,
            vec![
                ChatMessage::system(instruction_for(Intent::Research)),
                ChatMessage::user("what is tokio"),
            ]
        );
    }

    #[tokio::test]
    async fn test_intent_selects_instruction() {
        let client = ScriptedClient::new(vec![strong()]);
        let request = SearchRequest::new("cargo build fails").with_intent(Intent::Troubleshoot);
        dispatcher(&client).dispatch(&request).await.unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(
            calls[0].messages[0].content,
            instruction_for(Intent::Troubleshoot)
        );
    }

    #[tokio::test]
    async fn test_strong_answer_at_low_tier_stops_after_one_call() {
        let client = ScriptedClient::new(vec![strong()]);
        let request = SearchRequest::new("q").with_complexity(Complexity::Low);
        let answer = dispatcher(&client).dispatch(&request).await.unwrap();

        assert_eq!(answer.tier, Complexity::Low);
        assert_eq!(answer.model, "sonar");
        assert_eq!(answer.escalations(), 0);
        assert_eq!(client.models_called(), vec!["sonar"]);
    }

    #[tokio::test]
    async fn test_weak_answers_escalate_through_every_tier() {
        let client = ScriptedClient::new(vec![weak(), weak(), weak()]);
        let request = SearchRequest::new("q").with_complexity(Complexity::Low);
        let answer = dispatcher(&client).dispatch(&request).await.unwrap();

        assert_eq!(
            client.models_called(),
            vec!["sonar", "sonar-pro", "sonar-reasoning-pro"]
        );
        assert_eq!(answer.tier, Complexity::High);
        assert_eq!(answer.text, "x".repeat(50));
        assert_eq!(answer.escalations(), 2);
        let indices: Vec<usize> = answer.attempts.iter().map(|a| a.tier_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(matches!(answer.attempts[0].outcome, AttemptOutcome::Weak { .. }));
        assert_eq!(answer.attempts[2].outcome, AttemptOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_weak_then_strong_stops_at_medium() {
        let client = ScriptedClient::new(vec![weak(), strong()]);
        let request = SearchRequest::new("q").with_complexity(Complexity::Low);
        let answer = dispatcher(&client).dispatch(&request).await.unwrap();

        assert_eq!(answer.tier, Complexity::Medium);
        assert_eq!(client.models_called(), vec!["sonar", "sonar-pro"]);
    }

    #[tokio::test]
    async fn test_high_tier_accepts_weak_answer() {
        let client = ScriptedClient::new(vec![Ok(Some("I'm not sure.".to_string()))]);
        let request = SearchRequest::new("q").with_complexity(Complexity::High);
        let answer = dispatcher(&client).dispatch(&request).await.unwrap();

        assert_eq!(answer.text, "I'm not sure.");
        assert_eq!(client.models_called(), vec!["sonar-reasoning-pro"]);
    }

    #[tokio::test]
    async fn test_low_failure_recovered_by_medium() {
        let client = ScriptedClient::new(vec![transport_error(), strong()]);
        let request = SearchRequest::new("q").with_complexity(Complexity::Low);
        let answer = dispatcher(&client).dispatch(&request).await.unwrap();

        assert_eq!(answer.tier, Complexity::Medium);
        assert!(matches!(answer.attempts[0].outcome, AttemptOutcome::Failed { .. }));
        assert_eq!(client.models_called(), vec!["sonar", "sonar-pro"]);
    }

    #[tokio::test]
    async fn test_high_failure_as_starting_tier_is_surfaced() {
        let client = ScriptedClient::new(vec![transport_error()]);
        let request = SearchRequest::new("q").with_complexity(Complexity::High);
        let result = dispatcher(&client).dispatch(&request).await;

        match result {
            Err(TierSearchError::ExternalError(msg)) => assert!(msg.contains("503")),
            other => panic!("Expected ExternalError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_high_failure_after_escalation_is_surfaced() {
        let client = ScriptedClient::new(vec![weak(), transport_error()]);
        let request = SearchRequest::new("q");
        let result = dispatcher(&client).dispatch(&request).await;

        assert!(matches!(result, Err(TierSearchError::ExternalError(_))));
        assert_eq!(client.models_called(), vec!["sonar-pro", "sonar-reasoning-pro"]);
    }

    #[tokio::test]
    async fn test_empty_content_escalates() {
        let client = ScriptedClient::new(vec![Ok(None), strong()]);
        let request = SearchRequest::new("q").with_complexity(Complexity::Low);
        let answer = dispatcher(&client).dispatch(&request).await.unwrap();

        assert_eq!(answer.tier, Complexity::Medium);
        assert_eq!(
            answer.attempts[0].outcome,
            AttemptOutcome::Weak {
                reason: "empty answer".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_top_tier_exhausts() {
        let client = ScriptedClient::new(vec![transport_error(), weak(), Ok(None)]);
        let request = SearchRequest::new("q").with_complexity(Complexity::Low);
        let result = dispatcher(&client).dispatch(&request).await;

        match result {
            Err(TierSearchError::Exhausted { attempts }) => assert_eq!(attempts, 3),
            other => panic!("Expected Exhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_top_tier_accepts_whitespace_only_content() {
        let client = ScriptedClient::new(vec![Ok(Some("  \n ".to_string()))]);
        let request = SearchRequest::new("q").with_complexity(Complexity::High);
        let answer = dispatcher(&client).dispatch(&request).await.unwrap();

        assert_eq!(answer.text, "  \n ");
        assert_eq!(answer.attempts[0].outcome, AttemptOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_empty_string_counts_as_no_content() {
        let client = ScriptedClient::new(vec![Ok(Some(String::new())), strong()]);
        let request = SearchRequest::new("q").with_complexity(Complexity::Medium);
        let answer = dispatcher(&client).dispatch(&request).await.unwrap();

        assert_eq!(answer.tier, Complexity::High);
        assert_eq!(
            answer.attempts[0].outcome,
            AttemptOutcome::Weak {
                reason: "empty answer".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_config_overrides_models_and_thresholds() {
        let mut config = Config::default();
        config.service.models.medium = "custom-medium".to_string();
        config.service.max_tokens = 512;
        config.acceptance.min_chars = 10;

        let client = ScriptedClient::new(vec![Ok(Some("short\nbut fine".to_string()))]);
        let answer = EscalatingDispatcher::from_config(client.clone(), &config)
            .dispatch(&SearchRequest::new("q"))
            .await
            .unwrap();

        assert_eq!(answer.model, "custom-medium");
        assert_eq!(client.calls.lock().unwrap()[0].max_tokens, 512);
    }

    #[test]
    fn test_attempt_serialization() {
        let attempt = CompletionAttempt {
            tier_index: 0,
            tier: Complexity::Low,
            model: "sonar".to_string(),
            outcome: AttemptOutcome::Weak {
                reason: "answer has no line breaks".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&attempt).unwrap(),
            serde_json::json!({
                "tier_index": 0,
                "tier": "low",
                "model": "sonar",
                "status": "weak",
                "reason": "answer has no line breaks"
            })
        );
    }

    proptest! {
        #[test]
        fn prop_calls_never_exceed_remaining_ladder(start in 0usize..3, answer in "[a-z][a-z \n]{0,300}") {
            let tier = Complexity::LADDER[start];
            let remaining = Complexity::LADDER.len() - start;
            let script = (0..remaining).map(|_| Ok(Some(answer.clone()))).collect();
            let client = ScriptedClient::new(script);
            let request = SearchRequest::new("q").with_complexity(tier);

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let result = runtime.block_on(dispatcher(&client).dispatch(&request));

            let calls = client.calls.lock().unwrap().len();
            prop_assert!(calls >= 1 && calls <= remaining);
            // top tier accepts anything non-empty
            prop_assert!(result.is_ok());
            if AcceptanceHeuristic::default().is_acceptable(&answer) {
                prop_assert_eq!(calls, 1);
            } else {
                prop_assert_eq!(calls, remaining);
            }
        }
    }
}
