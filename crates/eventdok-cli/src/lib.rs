//! eventdok CLI - Command-line interface library
//!
//! This library provides the CLI functionality for eventdok, including:
//! - Generate: Event details to a formatted DOCX report
//! - Prompt: Show the AI prompt for a set of event details
//! - Structure: Show how report text is split into styled blocks
//! - Themes: List the built-in themes
//!
//! # Library Usage
//!
//! ```ignore
//! use eventdok_cli::{generate_command, run_cli};
//!
//! // Run the full CLI
//! run_cli();
//!
//! // Or use individual commands programmatically
//! let path = generate_command(&details, Some("Elegant Navy"), &photos, None, None, true)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Generate a report with photos
//! eventdok generate --details workshop.json --photo "photos/*.jpg"
//!
//! # Generate without calling the AI provider
//! eventdok generate --details workshop.toml --offline --output out/report.docx
//!
//! # Inspect the prompt
//! eventdok prompt --details workshop.json
//! ```

pub mod app;

// Re-export main entry point and commands
pub use app::{
    default_output_name, expand_photo_args, generate_command, prompt_command, run_cli,
    structure_command, themes_command,
};
