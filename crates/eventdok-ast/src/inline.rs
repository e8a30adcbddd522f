//! Inline spans within bullet items
//!
//! Bullet text is split on the strong-emphasis delimiter into a flat run
//! of spans that alternate between plain and emphasized text.

use serde::{Deserialize, Serialize};

/// A run of text with an emphasis flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Whether the run is rendered with strong emphasis
    pub strong: bool,
}

impl Span {
    /// Plain (non-emphasized) span
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strong: false,
        }
    }

    /// Emphasized span
    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strong: true,
        }
    }
}

/// Concatenate the text of a span run
pub fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_constructors() {
        assert!(!Span::plain("a").strong);
        assert!(Span::strong("b").strong);
    }

    #[test]
    fn test_spans_text() {
        let spans = vec![
            Span::plain("The "),
            Span::strong("key"),
            Span::plain(" point"),
        ];
        assert_eq!(spans_text(&spans), "The key point");
    }
}
