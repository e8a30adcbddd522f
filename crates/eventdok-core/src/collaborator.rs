//! AI report collaborator
//!
//! A collaborator turns a prompt into report text, or fails. Report
//! generation never fails because of the collaborator: any
//! [`ProviderError`] is downgraded to the deterministic fallback report.

use tracing::{debug, info, warn};

use crate::details::EventDetails;
use crate::error::Result;
use crate::fallback::fallback_report;
use crate::prompt::PromptBuilder;

/// Errors raised by a text-generation provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Network/HTTP error
    #[cfg(feature = "gemini")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Provider answered without any text
    #[error("Provider returned no text")]
    EmptyResponse,

    /// No API key configured
    #[error("API key not set (expected in environment variable {0})")]
    MissingApiKey(String),

    /// Provider deliberately unavailable (offline mode, tests)
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// A text-generation service that completes prompts
pub trait ReportCollaborator {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Complete one prompt; no streaming, no conversation state
    fn complete(&self, prompt: &str) -> std::result::Result<String, ProviderError>;
}

/// Collaborator that never answers, forcing the fallback report
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCollaborator;

impl ReportCollaborator for OfflineCollaborator {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn complete(&self, _prompt: &str) -> std::result::Result<String, ProviderError> {
        Err(ProviderError::Unavailable("offline mode".to_string()))
    }
}

/// Produce the report text for an event
///
/// Prompt construction errors propagate. A provider failure is logged and
/// replaced by [`fallback_report`], without retrying.
pub fn generate_report(
    collaborator: &dyn ReportCollaborator,
    prompts: &PromptBuilder,
    details: &EventDetails,
) -> Result<String> {
    let prompt = prompts.build(details)?;
    debug!("Built prompt ({} chars)", prompt.len());

    match collaborator.complete(&prompt) {
        Ok(text) => {
            info!(
                "Report text generated by {} ({} chars)",
                collaborator.name(),
                text.len()
            );
            Ok(text)
        }
        Err(e) => {
            warn!(
                "Error generating report with {}: {}; using fallback template",
                collaborator.name(),
                e
            );
            Ok(fallback_report(details))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::cell::Cell;

    struct FixedCollaborator {
        text: &'static str,
        calls: Cell<usize>,
    }

    impl ReportCollaborator for FixedCollaborator {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn complete(&self, _prompt: &str) -> std::result::Result<String, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.text.to_string())
        }
    }

    struct FailingCollaborator {
        calls: Cell<usize>,
    }

    impl ReportCollaborator for FailingCollaborator {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn complete(&self, _prompt: &str) -> std::result::Result<String, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            Err(ProviderError::Status {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    fn details() -> EventDetails {
        EventDetails {
            event_title: Some("AI Workshop".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_success_passes_text_through() {
        let collaborator = FixedCollaborator {
            text: "**1. Intro**\nSome text",
            calls: Cell::new(0),
        };
        let prompts = PromptBuilder::new("Write about {event_title}");
        let text = generate_report(&collaborator, &prompts, &details()).unwrap();
        assert_eq!(text, "**1. Intro**\nSome text");
        assert_eq!(collaborator.calls.get(), 1);
    }

    #[test]
    fn test_failure_yields_exact_fallback() {
        let collaborator = FailingCollaborator {
            calls: Cell::new(0),
        };
        let prompts = PromptBuilder::new("Write about {event_title}");
        let text = generate_report(&collaborator, &prompts, &details()).unwrap();
        assert_eq!(text, fallback_report(&details()));
        // single attempt, no retry
        assert_eq!(collaborator.calls.get(), 1);
    }

    #[test]
    fn test_offline_collaborator_falls_back() {
        let prompts = PromptBuilder::new("{event_title}");
        let text = generate_report(&OfflineCollaborator, &prompts, &details()).unwrap();
        assert_eq!(text, fallback_report(&details()));
    }

    #[test]
    fn test_prompt_error_propagates() {
        let collaborator = FixedCollaborator {
            text: "unused",
            calls: Cell::new(0),
        };
        let prompts = PromptBuilder::new("{venue}");
        let err = generate_report(&collaborator, &prompts, &details()).unwrap_err();
        assert!(matches!(err, CoreError::MissingTemplatePlaceholder(_)));
        assert_eq!(collaborator.calls.get(), 0);
    }
}
