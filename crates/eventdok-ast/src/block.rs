//! Block-level elements for report structure
//!
//! This module defines the block-level elements a report is made of:
//! title and subtitle, section and subsection headings, bullets, quotes,
//! paragraphs, photographs and the footer. The ordered `Vec<Block>` is the
//! complete input contract of a document writer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::inline::{spans_text, Span};
use crate::style::BlockStyle;

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// Document title
    Title(TextBlock),
    /// Institution lines under the title
    SubtitleInfo(TextBlock),
    /// A top-level section heading
    SectionHeading(TextBlock),
    /// A heading nested inside a section
    SubsectionHeading(TextBlock),
    /// A bullet point with inline emphasis spans
    BulletItem(BulletItem),
    /// A quoted line
    Quote(TextBlock),
    /// A body paragraph
    Paragraph(TextBlock),
    /// An embedded picture (banner or event photo)
    Photo(PhotoBlock),
    /// Generation footer
    Footer(TextBlock),
}

/// A block holding a single run of text
///
/// Text may contain `\n`, which writers render as a line break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub style: BlockStyle,
}

/// A bullet list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletItem {
    /// Alternating plain/strong runs, in source order
    pub spans: Vec<Span>,
    pub style: BlockStyle,
}

/// An embedded picture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoBlock {
    /// Image file on disk
    pub path: PathBuf,
    /// Caption rendered below the picture
    pub caption: Option<String>,
    /// Display width in inches; height follows the image aspect ratio
    pub width_inches: f32,
    /// Paragraph style of the picture itself
    pub style: BlockStyle,
    /// Style of the caption paragraph
    pub caption_style: BlockStyle,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, style: BlockStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl BulletItem {
    /// Bullet with a single plain span
    pub fn plain(text: impl Into<String>, style: BlockStyle) -> Self {
        Self {
            spans: vec![Span::plain(text)],
            style,
        }
    }

    /// Bullet text with emphasis removed
    pub fn text(&self) -> String {
        spans_text(&self.spans)
    }
}

impl Block {
    /// Short name of the block kind, used in logs and tests
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Title(_) => "title",
            Block::SubtitleInfo(_) => "subtitle",
            Block::SectionHeading(_) => "section",
            Block::SubsectionHeading(_) => "subsection",
            Block::BulletItem(_) => "bullet",
            Block::Quote(_) => "quote",
            Block::Paragraph(_) => "paragraph",
            Block::Photo(_) => "photo",
            Block::Footer(_) => "footer",
        }
    }

    /// The resolved style of this block
    pub fn style(&self) -> &BlockStyle {
        match self {
            Block::Title(b)
            | Block::SubtitleInfo(b)
            | Block::SectionHeading(b)
            | Block::SubsectionHeading(b)
            | Block::Quote(b)
            | Block::Paragraph(b)
            | Block::Footer(b) => &b.style,
            Block::BulletItem(item) => &item.style,
            Block::Photo(photo) => &photo.style,
        }
    }

    /// Plain text of the block; photos yield their caption
    pub fn text(&self) -> String {
        match self {
            Block::Title(b)
            | Block::SubtitleInfo(b)
            | Block::SectionHeading(b)
            | Block::SubsectionHeading(b)
            | Block::Quote(b)
            | Block::Paragraph(b)
            | Block::Footer(b) => b.text.clone(),
            Block::BulletItem(item) => item.text(),
            Block::Photo(photo) => photo.caption.clone().unwrap_or_default(),
        }
    }
}
