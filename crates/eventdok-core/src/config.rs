//! Configuration settings
//!
//! Settings are read once at startup from `eventdok.toml` (or defaults) and
//! passed explicitly to the pipeline; nothing looks them up globally.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::prompt::PromptBuilder;
use crate::theme::DEFAULT_THEME;

/// File name looked up in the working directory when no config is given
pub const CONFIG_FILE_NAME: &str = "eventdok.toml";

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// File locations
    pub paths: PathSettings,
    /// Default values for report requests
    pub defaults: DefaultSettings,
    /// Text-generation provider
    pub provider: ProviderSettings,
}

/// File locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Banner image placed above the title, if it exists
    pub banner: PathBuf,
    /// Prompt template file; the built-in template is used when unset
    pub prompt_template: Option<PathBuf>,
    /// Directory for reports saved under a bare file name
    pub output_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            banner: PathBuf::from("assets/banner.png"),
            prompt_template: None,
            output_dir: PathBuf::from("generated_reports"),
        }
    }
}

/// Default values applied to report requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    pub college: String,
    pub department: String,
    pub theme: String,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            college: "Pimpri Chinchwad College Of Engineering".to_string(),
            department: "Department of CSE(AIML)".to_string(),
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Text-generation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Model name passed to the API
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load an explicit config file, else `eventdok.toml` if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                debug!("Loading config: {}", path.display());
                Self::load(path)
            }
            None if Path::new(CONFIG_FILE_NAME).exists() => {
                debug!("Loading config: {}", CONFIG_FILE_NAME);
                Self::load(Path::new(CONFIG_FILE_NAME))
            }
            None => Ok(Self::default()),
        }
    }

    /// Prompt builder for the configured template
    pub fn prompt_builder(&self) -> Result<PromptBuilder> {
        match &self.paths.prompt_template {
            Some(path) => PromptBuilder::from_file(path),
            None => Ok(PromptBuilder::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.paths.banner, PathBuf::from("assets/banner.png"));
        assert_eq!(settings.paths.output_dir, PathBuf::from("generated_reports"));
        assert_eq!(settings.defaults.theme, "Academic Blue");
        assert_eq!(settings.provider.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
[paths]
output_dir = "out"

[defaults]
theme = "Elegant Navy"
"#,
        )
        .unwrap();
        assert_eq!(settings.paths.output_dir, PathBuf::from("out"));
        assert_eq!(settings.paths.banner, PathBuf::from("assets/banner.png"));
        assert_eq!(settings.defaults.theme, "Elegant Navy");
        assert_eq!(settings.defaults.department, "Department of CSE(AIML)");
        assert_eq!(settings.provider.timeout_secs, 60);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Settings::from_toml_str("[paths\nbanner = 1").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_prompt_builder_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("prompt.txt");
        std::fs::write(&template, "Title: {event_title}").unwrap();

        let mut settings = Settings::default();
        settings.paths.prompt_template = Some(template);
        let builder = settings.prompt_builder().unwrap();
        assert_eq!(builder.template(), "Title: {event_title}");
    }

    #[test]
    fn test_discover_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[provider]\nmodel = \"gemini-pro\"\n").unwrap();

        let settings = Settings::discover(Some(&path)).unwrap();
        assert_eq!(settings.provider.model, "gemini-pro");
    }
}
