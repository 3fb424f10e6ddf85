//! Ask the model for a bill's metadata, retrying on failure.
//!
//! Every attempt sends the full prompt. A response that fails to parse adds
//! a correction to the payload for the following attempts; a failed call
//! retries with the payload unchanged. Attempts are separated by a fixed
//! delay. When the budget runs out the bill gets no metadata this run.

use std::time::Duration;

use billsort_core::{BillMetadata, parse_metadata};
use tracing::{error, info, warn};

use crate::gemini::TextModel;
use crate::prompt::{CORRECTION, MAX_TEXT_CHARS, build_prompt, truncate_chars};

/// Characters of a bad response kept in the log line.
const RESPONSE_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct RetitleOptions {
    /// Maximum number of model calls.
    pub attempts: u32,
    /// Pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetitleOptions {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(15),
        }
    }
}

/// Request metadata for one bill's text. `None` once all attempts have failed.
pub async fn request_retitle(
    model: &dyn TextModel,
    text: &str,
    opts: &RetitleOptions,
) -> Option<BillMetadata> {
    let mut payload = truncate_chars(text, MAX_TEXT_CHARS).to_string();

    for attempt in 1..=opts.attempts {
        let remaining = opts.attempts - attempt;
        let prompt = build_prompt(&payload);

        match model.generate(&prompt).await {
            Ok(raw) => match parse_metadata(&raw) {
                Ok(meta) => {
                    info!(attempt, title = %meta.title(), "model returned metadata");
                    return Some(meta);
                }
                Err(e) => {
                    warn!(
                        attempt,
                        remaining,
                        error = %e,
                        response = %truncate_chars(&raw, RESPONSE_PREVIEW_CHARS),
                        "JSON parsing error"
                    );
                    payload.push_str(CORRECTION);
                }
            },
            Err(e) => {
                warn!(attempt, remaining, error = %e, "model call failed");
            }
        }

        if remaining > 0 {
            tokio::time::sleep(opts.delay).await;
        }
    }

    error!(attempts = opts.attempts, "failed to process file");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::ModelError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records every prompt it receives.
    struct Scripted {
        replies: Mutex<VecDeque<Result<String, ModelError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<String, ModelError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        fn prompt(&self, i: usize) -> String {
            self.prompts.lock().unwrap()[i].clone()
        }
    }

    #[async_trait]
    impl TextModel for Scripted {
        async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ModelError::EmptyResponse))
        }
    }

    fn fast() -> RetitleOptions {
        RetitleOptions {
            attempts: 5,
            delay: Duration::ZERO,
        }
    }

    fn ok(s: &str) -> Result<String, ModelError> {
        Ok(s.to_string())
    }

    #[tokio::test]
    async fn first_attempt_success() {
        let model = Scripted::new(vec![ok(r#"{"title": "Good Act of 2020"}"#)]);
        let meta = request_retitle(&model, "bill text", &fast()).await.unwrap();
        assert_eq!(meta.title(), "Good Act of 2020");
        assert_eq!(model.calls(), 1);
        assert!(model.prompt(0).contains("bill text"));
    }

    #[tokio::test]
    async fn fenced_response_parses() {
        let model = Scripted::new(vec![ok("```json\n{\"title\": \"Fenced Act of 2019\"}\n```")]);
        let meta = request_retitle(&model, "t", &fast()).await.unwrap();
        assert_eq!(meta.title(), "Fenced Act of 2019");
    }

    #[tokio::test]
    async fn always_failing_model_gets_exactly_budget_calls() {
        let model = Scripted::new(vec![]);
        assert!(request_retitle(&model, "t", &fast()).await.is_none());
        assert_eq!(model.calls(), 5);
    }

    #[tokio::test]
    async fn bad_json_adds_correction() {
        let model = Scripted::new(vec![
            ok("not json at all"),
            ok(r#"{"title": "Second Try Act of 2021"}"#),
        ]);
        let meta = request_retitle(&model, "t", &fast()).await.unwrap();
        assert_eq!(meta.title(), "Second Try Act of 2021");
        assert_eq!(model.calls(), 2);
        assert!(!model.prompt(0).contains(CORRECTION));
        assert!(model.prompt(1).contains(CORRECTION));
    }

    #[tokio::test]
    async fn missing_title_is_retried_with_correction() {
        let model = Scripted::new(vec![
            ok(r#"{"author": "Rep. X"}"#),
            ok(r#"{"title": "Titled Act of 2022"}"#),
        ]);
        let meta = request_retitle(&model, "t", &fast()).await.unwrap();
        assert_eq!(meta.title(), "Titled Act of 2022");
        assert!(model.prompt(1).contains(CORRECTION));
    }

    #[tokio::test]
    async fn call_error_keeps_payload_unchanged() {
        let model = Scripted::new(vec![
            Err(ModelError::Server {
                status: 503,
                body: "overloaded".into(),
            }),
            ok(r#"{"title": "Retry Act of 2023"}"#),
        ]);
        let meta = request_retitle(&model, "t", &fast()).await.unwrap();
        assert_eq!(meta.title(), "Retry Act of 2023");
        assert_eq!(model.prompt(0), model.prompt(1));
    }

    #[tokio::test]
    async fn corrections_accumulate() {
        let model = Scripted::new(vec![ok("x"), ok("y"), ok(r#"{"title": "T"}"#)]);
        request_retitle(&model, "t", &fast()).await.unwrap();
        assert_eq!(model.prompt(2).matches(CORRECTION).count(), 2);
    }

    #[tokio::test]
    async fn long_text_is_capped() {
        let model = Scripted::new(vec![ok(r#"{"title": "Long Act"}"#)]);
        let text = "a".repeat(MAX_TEXT_CHARS + 1000);
        request_retitle(&model, &text, &fast()).await.unwrap();
        let sent = model.prompt(0);
        assert!(sent.contains(&"a".repeat(MAX_TEXT_CHARS)));
        assert!(!sent.contains(&"a".repeat(MAX_TEXT_CHARS + 1)));
    }

    #[tokio::test]
    async fn zero_attempts_never_calls() {
        let model = Scripted::new(vec![ok(r#"{"title": "T"}"#)]);
        let opts = RetitleOptions {
            attempts: 0,
            delay: Duration::ZERO,
        };
        assert!(request_retitle(&model, "t", &opts).await.is_none());
        assert_eq!(model.calls(), 0);
    }
}
