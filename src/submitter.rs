use crate::chat_client::ChatClient;
use crate::dom::{Document, OutputSink, PromptSource};
use crate::error::SubmitError;
use crate::schemas::prompt_request::PromptRequest;
use crate::schemas::prompt_response::{PromptResponse, NO_ANSWER};
use crate::schemas::submission_status::SubmissionStatus;
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info};

/// Written to the output as soon as a submission starts.
pub const EDITING_PLACEHOLDER: &str = "Editing...";
/// Written to the output when a submission fails for any reason.
pub const ERROR_TEXT: &str = "Error.";

/// What happens to replies of submissions that overlap in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Only the most recent submission may write its result; replies to
    /// older submissions are dropped.
    #[default]
    LatestRequestWins,
    /// Every reply is written when it arrives, so the one resolving last
    /// stays on screen.
    LastResolvedWins,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "latest-request" => Ok(OverlapPolicy::LatestRequestWins),
            "last-resolved" => Ok(OverlapPolicy::LastResolvedWins),
            other => Err(format!(
                "unknown overlap policy \"{}\" (expected \"latest-request\" or \"last-resolved\")",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Answered(String),
    NoAnswer,
    Failed,
    /// A newer submission started before this one resolved.
    Superseded,
}

impl SubmissionOutcome {
    /// Text this submission left in the output, or `None` if it wrote nothing.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Answered(answer) => Some(answer),
            SubmissionOutcome::NoAnswer => Some(NO_ANSWER),
            SubmissionOutcome::Failed => Some(ERROR_TEXT),
            SubmissionOutcome::Superseded => None,
        }
    }
}

#[derive(Debug, Default)]
struct SubmitState {
    generation: u64,
    status: SubmissionStatus,
}

/// Reads the prompt element, posts it to the chat endpoint and writes the
/// answer (or a fallback) into the output element.
#[derive(Clone)]
pub struct PromptSubmitter {
    client: ChatClient,
    source: Arc<dyn PromptSource>,
    sink: Arc<dyn OutputSink>,
    policy: OverlapPolicy,
    state: Arc<Mutex<SubmitState>>,
}

impl PromptSubmitter {
    pub fn new(source: impl PromptSource + 'static, sink: impl OutputSink + 'static) -> Self {
        Self {
            client: ChatClient::new(),
            source: Arc::new(source),
            sink: Arc::new(sink),
            policy: OverlapPolicy::default(),
            state: Arc::new(Mutex::new(SubmitState::default())),
        }
    }

    /// Binds to the elements named in `settings`.
    pub fn from_document(document: &Document, settings: &Settings) -> Result<Self, SubmitError> {
        let source = document
            .element(&settings.prompt_element)
            .ok_or_else(|| SubmitError::MissingElement(settings.prompt_element.clone()))?;
        let sink = document
            .element(&settings.response_element)
            .ok_or_else(|| SubmitError::MissingElement(settings.response_element.clone()))?;

        Ok(Self::new(source, sink).with_policy(settings.overlap_policy))
    }

    pub fn with_client(mut self, client: ChatClient) -> Self {
        self.client = client;
        self
    }

    pub fn with_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Status of the most recent submission.
    pub fn status(&self) -> SubmissionStatus {
        self.lock_state().status
    }

    /// Starts a submission.
    ///
    /// The prompt is read and the placeholder written before this returns;
    /// the returned future sends the request and writes the final text.
    pub fn submit(&self) -> impl Future<Output = SubmissionOutcome> + Send + 'static {
        let prompt = self.source.value();

        let generation = {
            let mut state = self.lock_state();
            state.generation += 1;
            state.status = SubmissionStatus::Sending;
            self.sink.set_text(EDITING_PLACEHOLDER);
            debug!("Prompt #{} -> {}", state.generation, state.status.as_str());
            state.generation
        };

        let submitter = self.clone();
        async move {
            let started_at = Utc::now();
            info!(
                "Submitting prompt #{} ({} chars)",
                generation,
                prompt.chars().count()
            );

            let request = PromptRequest::new(prompt);
            let result = submitter.client.send_prompt(&request).await;
            submitter.finish(generation, result, started_at)
        }
    }

    fn finish(
        &self,
        generation: u64,
        result: Result<PromptResponse, SubmitError>,
        started_at: DateTime<Utc>,
    ) -> SubmissionOutcome {
        // Held across the check and the write so a newer placeholder is
        // never overwritten by a stale reply.
        let mut state = self.lock_state();

        if self.policy == OverlapPolicy::LatestRequestWins && state.generation != generation {
            match &result {
                Ok(_) => debug!(
                    "Discarding reply to prompt #{}: superseded by #{}",
                    generation, state.generation
                ),
                Err(e) => debug!(
                    "Discarding failure of prompt #{} ({}): superseded by #{}",
                    generation, e, state.generation
                ),
            }
            return SubmissionOutcome::Superseded;
        }

        let elapsed_ms = Utc::now()
            .signed_duration_since(started_at)
            .num_milliseconds();

        match result {
            Ok(reply) => {
                self.sink.set_text(reply.display_text());
                state.status = SubmissionStatus::Success;
                info!(
                    "Prompt #{} -> {} in {}ms",
                    generation,
                    state.status.as_str(),
                    elapsed_ms
                );

                match reply.response {
                    Some(answer) => SubmissionOutcome::Answered(answer),
                    None => SubmissionOutcome::NoAnswer,
                }
            }
            Err(e) => {
                self.sink.set_text(ERROR_TEXT);
                state.status = SubmissionStatus::Failure;
                error!(
                    "Prompt #{} -> {} after {}ms: {}",
                    generation,
                    state.status.as_str(),
                    elapsed_ms,
                    e
                );
                SubmissionOutcome::Failed
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmitState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::TextElement;

    fn unreachable_client() -> ChatClient {
        ChatClient::with_endpoint("http://127.0.0.1:1/assistant/chat")
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!(
            "latest-request".parse::<OverlapPolicy>(),
            Ok(OverlapPolicy::LatestRequestWins)
        );
        assert_eq!(
            "last-resolved".parse::<OverlapPolicy>(),
            Ok(OverlapPolicy::LastResolvedWins)
        );
        assert!("whatever".parse::<OverlapPolicy>().is_err());
    }

    #[test]
    fn binding_requires_both_elements() {
        let mut document = Document::new();
        document.insert("prompt", TextElement::new());

        let err = PromptSubmitter::from_document(&document, &Settings::default())
            .err()
            .unwrap();
        assert!(matches!(err, SubmitError::MissingElement(id) if id == "response"));
    }

    #[tokio::test]
    async fn placeholder_is_written_before_polling() {
        let prompt = TextElement::with_value("hello");
        let output = TextElement::with_value("previous answer");
        let submitter =
            PromptSubmitter::new(prompt, output.clone()).with_client(unreachable_client());

        assert_eq!(submitter.status(), SubmissionStatus::Idle);
        let pending = submitter.submit();

        assert_eq!(output.value(), EDITING_PLACEHOLDER);
        assert_eq!(submitter.status(), SubmissionStatus::Sending);

        assert_eq!(pending.await, SubmissionOutcome::Failed);
        assert_eq!(output.value(), ERROR_TEXT);
        assert_eq!(submitter.status(), SubmissionStatus::Failure);
    }

    #[test]
    fn outcome_text_matches_what_was_written() {
        assert_eq!(
            SubmissionOutcome::Answered("answer A".to_string()).display_text(),
            Some("answer A")
        );
        assert_eq!(SubmissionOutcome::NoAnswer.display_text(), Some(NO_ANSWER));
        assert_eq!(SubmissionOutcome::Failed.display_text(), Some(ERROR_TEXT));
        assert_eq!(SubmissionOutcome::Superseded.display_text(), None);
    }

    #[tokio::test]
    async fn stale_failure_does_not_overwrite_newer_placeholder() {
        let prompt = TextElement::with_value("first");
        let output = TextElement::new();
        let submitter =
            PromptSubmitter::new(prompt.clone(), output.clone()).with_client(unreachable_client());

        let first = submitter.submit();
        prompt.set_value("second");
        let _second = submitter.submit();

        assert_eq!(first.await, SubmissionOutcome::Superseded);
        assert_eq!(output.value(), EDITING_PLACEHOLDER);
        assert_eq!(submitter.status(), SubmissionStatus::Sending);
    }
}
