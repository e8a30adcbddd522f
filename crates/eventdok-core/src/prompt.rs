//! Prompt builder
//!
//! Fills a text template with event-detail fields. Placeholders are
//! `{field_name}`; `{{` and `}}` produce literal braces. Absent fields
//! substitute as empty text. A placeholder naming no event-detail field is
//! a configuration defect and fails substitution.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::details::EventDetails;
use crate::error::{CoreError, Result};

/// Template compiled into the crate, used when no template file is configured
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/event_prompt.txt");

/// Report style used when the details do not name one
pub const DEFAULT_REPORT_STYLE: &str = "Concise & Realistic";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap())
}

/// Builds AI prompts from a text template
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl PromptBuilder {
    /// Create a builder from template text
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Load the template from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let template = std::fs::read_to_string(path).map_err(|source| CoreError::TemplateIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(template))
    }

    /// The raw template text
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names in order of first appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for caps in placeholder_regex().captures_iter(&self.template) {
            if let Some(name) = caps.get(1) {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }
        names
    }

    /// Substitute every placeholder with its event-detail value
    ///
    /// Absent fields become empty, except `report_style`, which falls back
    /// to [`DEFAULT_REPORT_STYLE`]. A name outside [`EventDetails::KEYS`]
    /// fails with [`CoreError::MissingTemplatePlaceholder`].
    pub fn build(&self, details: &EventDetails) -> Result<String> {
        let mut output = String::with_capacity(self.template.len());
        let mut last = 0;

        for caps in placeholder_regex().captures_iter(&self.template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            output.push_str(&self.template[last..whole.start()]);
            last = whole.end();

            match caps.get(1) {
                Some(name) => output.push_str(resolve(details, name.as_str())?),
                None if whole.as_str() == "{{" => output.push('{'),
                None => output.push('}'),
            }
        }
        output.push_str(&self.template[last..]);

        Ok(output)
    }
}

fn resolve<'a>(details: &'a EventDetails, name: &str) -> Result<&'a str> {
    match (name, details.get(name)) {
        (_, Some(value)) => Ok(value),
        ("report_style", None) => Ok(DEFAULT_REPORT_STYLE),
        (_, None) if EventDetails::KEYS.contains(&name) => Ok(""),
        (_, None) => Err(CoreError::MissingTemplatePlaceholder(name.to_string())),
    }
}
