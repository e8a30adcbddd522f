//! Event details supplied by the user
//!
//! Every field is optional. A field that is present but empty is kept as
//! an empty string: fallbacks apply only to absent fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Structured description of one event
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDetails {
    pub event_title: Option<String>,
    pub college_name: Option<String>,
    pub dept_name: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub organizer: Option<String>,
    pub speaker: Option<String>,
    pub event_type: Option<String>,
    pub objectives: Option<String>,
    pub outcomes: Option<String>,
    /// Comma-separated participant names
    pub participants: Option<String>,
    pub report_style: Option<String>,
}

impl EventDetails {
    /// Field names, as used by prompt template placeholders
    pub const KEYS: &'static [&'static str] = &[
        "event_title",
        "college_name",
        "dept_name",
        "date",
        "venue",
        "organizer",
        "speaker",
        "event_type",
        "objectives",
        "outcomes",
        "participants",
        "report_style",
    ];

    /// Look a field up by its key name
    ///
    /// Returns `None` both for unknown keys and for absent fields.
    pub fn get(&self, key: &str) -> Option<&str> {
        let field = match key {
            "event_title" => &self.event_title,
            "college_name" => &self.college_name,
            "dept_name" => &self.dept_name,
            "date" => &self.date,
            "venue" => &self.venue,
            "organizer" => &self.organizer,
            "speaker" => &self.speaker,
            "event_type" => &self.event_type,
            "objectives" => &self.objectives,
            "outcomes" => &self.outcomes,
            "participants" => &self.participants,
            "report_style" => &self.report_style,
            _ => return None,
        };
        field.as_deref()
    }

    /// Field value, or `default` when the field is absent
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Fill absent college and department fields
    pub fn with_defaults(mut self, college: &str, department: &str) -> Self {
        if self.college_name.is_none() {
            self.college_name = Some(college.to_string());
        }
        if self.dept_name.is_none() {
            self.dept_name = Some(department.to_string());
        }
        self
    }

    /// Trimmed, non-empty participant names in the order given
    pub fn participant_names(&self) -> Vec<&str> {
        self.participants
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parse details from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CoreError::Details(e.to_string()))
    }

    /// Parse details from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CoreError::Details(e.to_string()))
    }

    /// Load details from a `.json` or `.toml` file, chosen by extension
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_and_unknown_keys() {
        let details = EventDetails {
            venue: Some("Hall A".to_string()),
            ..Default::default()
        };
        assert_eq!(details.get("venue"), Some("Hall A"));
        assert_eq!(details.get("speaker"), None);
        assert_eq!(details.get("no_such_field"), None);
    }

    #[test]
    fn test_every_key_is_addressable() {
        let details = EventDetails::from_json_str(
            r#"{"event_title":"a","college_name":"b","dept_name":"c","date":"d",
                "venue":"e","organizer":"f","speaker":"g","event_type":"h",
                "objectives":"i","outcomes":"j","participants":"k","report_style":"l"}"#,
        )
        .unwrap();
        for key in EventDetails::KEYS {
            assert!(details.get(key).is_some(), "key {} not mapped", key);
        }
    }

    #[test]
    fn test_empty_field_is_not_absent() {
        let details = EventDetails {
            speaker: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(details.get_or("speaker", "Speaker"), "");
        assert_eq!(details.get_or("venue", "Venue"), "Venue");
    }

    #[test]
    fn test_participant_names_trimmed() {
        let details = EventDetails {
            participants: Some("Alice, Bob ,Carol, ,".to_string()),
            ..Default::default()
        };
        assert_eq!(details.participant_names(), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_with_defaults_keeps_given_values() {
        let details = EventDetails {
            college_name: Some("X College".to_string()),
            ..Default::default()
        }
        .with_defaults("Default College", "Default Dept");
        assert_eq!(details.college_name.as_deref(), Some("X College"));
        assert_eq!(details.dept_name.as_deref(), Some("Default Dept"));
    }

    #[test]
    fn test_from_toml() {
        let details = EventDetails::from_toml_str(
            "event_title = \"AI Workshop\"\nparticipants = \"A, B\"\n",
        )
        .unwrap();
        assert_eq!(details.event_title.as_deref(), Some("AI Workshop"));
        assert_eq!(details.participant_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_invalid_json_is_details_error() {
        let err = EventDetails::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Details(_)));
    }
}
