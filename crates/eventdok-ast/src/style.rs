//! Resolved visual style carried by every block
//!
//! A [`BlockStyle`] is the complete set of rendering directives for one
//! block: which named paragraph style it belongs to, plus the direct run and
//! paragraph formatting a writer must apply.

use serde::{Deserialize, Serialize};

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// WordprocessingML `w:jc` value
    pub fn ooxml_value(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Rendering style for one block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStyle {
    /// Named paragraph style (e.g. "SectionHeading"); `None` uses the default
    pub style_id: Option<String>,
    /// Font family name
    pub font: String,
    /// Font size in points
    pub size_pt: u8,
    /// Text color as 6-digit RGB hex, without `#`
    pub color: Option<String>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Paragraph alignment
    pub alignment: Alignment,
    /// Space before the paragraph, in points
    pub space_before_pt: Option<u8>,
    /// Space after the paragraph, in points
    pub space_after_pt: Option<u8>,
    /// Line spacing multiplier (1.0 = single)
    pub line_spacing: Option<f32>,
}

impl BlockStyle {
    /// Plain style in the given font and size
    pub fn new(font: impl Into<String>, size_pt: u8) -> Self {
        Self {
            style_id: None,
            font: font.into(),
            size_pt,
            color: None,
            bold: false,
            italic: false,
            alignment: Alignment::Left,
            space_before_pt: None,
            space_after_pt: None,
            line_spacing: None,
        }
    }

    pub fn with_style_id(mut self, id: impl Into<String>) -> Self {
        self.style_id = Some(id.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set paragraph spacing before and after, in points
    pub fn with_spacing(mut self, before: u8, after: u8) -> Self {
        self.space_before_pt = Some(before);
        self.space_after_pt = Some(after);
        self
    }

    pub fn with_line_spacing(mut self, multiplier: f32) -> Self {
        self.line_spacing = Some(multiplier);
        self
    }

    /// Font size in half-points, the unit WordprocessingML uses for `w:sz`
    pub fn half_points(&self) -> u32 {
        u32::from(self.size_pt) * 2
    }
}
