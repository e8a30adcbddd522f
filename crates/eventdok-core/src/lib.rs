//! eventdok-core - Event reports from structured details
//!
//! Core library for eventdok: themes, prompt construction, the AI
//! collaborator seam with its deterministic fallback, and the engine that
//! structures report text into styled blocks.
//!
//! # Example
//!
//! ```
//! use eventdok_core::{
//!     generate_report, EventDetails, OfflineCollaborator, PromptBuilder, ReportStructurer,
//!     ThemeRegistry,
//! };
//!
//! let details = EventDetails {
//!     event_title: Some("AI Workshop".to_string()),
//!     ..Default::default()
//! };
//!
//! let prompts = PromptBuilder::new("Write a report on {event_title}.");
//! let text = generate_report(&OfflineCollaborator, &prompts, &details).unwrap();
//!
//! let registry = ThemeRegistry::builtin();
//! let blocks = ReportStructurer::new(registry.get("Elegant Navy").unwrap())
//!     .structure(&details, &text, &[]);
//! assert_eq!(blocks[0].text(), "AI Workshop - Report");
//! ```

pub mod collaborator;
pub mod config;
pub mod details;
pub mod error;
pub mod fallback;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod prompt;
pub mod structure;
pub mod theme;

// Re-export main types and functions
pub use collaborator::{generate_report, OfflineCollaborator, ProviderError, ReportCollaborator};
pub use config::Settings;
pub use details::EventDetails;
pub use error::{CoreError, Result};
pub use fallback::fallback_report;
#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;
pub use prompt::PromptBuilder;
pub use structure::{classify_line, LineKind, ReportStructurer};
pub use theme::{ThemeDescriptor, ThemeRegistry, DEFAULT_THEME};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
