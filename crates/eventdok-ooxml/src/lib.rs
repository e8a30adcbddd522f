//! # eventdok-ooxml
//!
//! DOCX (Office Open XML) generation for eventdok reports.
//!
//! This crate provides functionality to:
//! - Render a styled block sequence into a self-contained DOCX package
//! - Embed banner and photo images with their real aspect ratio
//! - Read packages back for inspection
//!
//! ## Example: Reading a Generated Report
//!
//! ```no_run
//! use eventdok_ooxml::{OoxmlArchive, StyleSheet};
//!
//! let archive = OoxmlArchive::open("generated_reports/report.docx")?;
//! let styles = StyleSheet::parse(archive.styles_xml()?)?;
//!
//! for style in styles.styles() {
//!     println!("{} ({})", style.name, style.id);
//! }
//! # Ok::<(), eventdok_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod error;
pub mod image;
pub mod package;
pub mod relationships;
pub mod styles;
pub mod writer;

#[cfg(test)]
mod test_utils;

pub use archive::OoxmlArchive;
pub use error::{OoxmlError, Result};
pub use relationships::Relationships;
pub use styles::{Style, StyleSheet};
pub use writer::{resolve_output_path, DocxWriter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
