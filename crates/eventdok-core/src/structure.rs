//! Document structuring engine
//!
//! Converts loosely structured report text into an ordered sequence of
//! styled [`Block`]s.
//!
//! # Conventions
//!
//! - Paragraphs are separated by blank lines
//! - A paragraph whose first line is `**X**` is a section headed `X`
//! - Inside a section, each line is classified by [`classify_line`]:
//!   `**X**` (short) is a subsection heading, `*`/`•` lines are bullets,
//!   `"..."` lines are quotes, everything else is body text
//! - Paragraphs without a heading are kept whole as body text
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use eventdok_core::{EventDetails, ReportStructurer, ThemeRegistry};
//!
//! let registry = ThemeRegistry::builtin();
//! let theme = registry.get("Academic Blue").unwrap();
//! let details = EventDetails {
//!     event_title: Some("AI Workshop".to_string()),
//!     ..Default::default()
//! };
//!
//! let blocks = ReportStructurer::new(theme)
//!     .with_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
//!     .structure(&details, "**1. Intro**\nSome text", &[]);
//!
//! assert_eq!(blocks[0].text(), "AI Workshop - Report");
//! assert_eq!(blocks[2].text(), "1. Intro");
//! assert_eq!(blocks.last().unwrap().text(), "Report generated on: 05 March 2024");
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use eventdok_ast::{Block, BulletItem, PhotoBlock, Span, TextBlock};
use tracing::debug;

use crate::details::EventDetails;
use crate::theme::ThemeDescriptor;

/// Strong-emphasis delimiter
const STRONG: &str = "**";

/// Lines at least this long are never subsection headings
const SUBHEADING_MAX_CHARS: usize = 100;

/// Bullet markers; the last one is a mis-encoded `•` seen in older inputs
const BULLET_MARKERS: &[&str] = &["\u{2022}", "\u{e2}\u{20ac}\u{a2}", "*"];

const BANNER_WIDTH_INCHES: f32 = 6.5;
const PHOTO_WIDTH_INCHES: f32 = 4.5;

const PARTICIPANTS_HEADING: &str = "Additional Participants";
const PHOTOS_HEADING: &str = "Event Photographs";

/// Category of a line following a section heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Short line wrapped in `**`; holds the stripped text
    Subheading(&'a str),
    /// Bullet line; holds the text after the marker
    Bullet(&'a str),
    /// Line wrapped in double quotes; holds the whole line, quotes included
    Quote(&'a str),
    /// Any other line
    Paragraph(&'a str),
}

/// Text between a leading and trailing `**`, trimmed
///
/// Only the outer delimiters are removed; `**` inside the text is kept.
pub fn strip_strong(line: &str) -> Option<&str> {
    if line.len() < 2 * STRONG.len() {
        return None;
    }
    line.strip_prefix(STRONG)
        .and_then(|rest| rest.strip_suffix(STRONG))
        .map(str::trim)
}

/// Classify a trimmed line that follows a section heading
///
/// Categories are tried in priority order: subheading, bullet, quote,
/// paragraph. The first match wins.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let subheading = strip_strong(line).filter(|_| line.chars().count() < SUBHEADING_MAX_CHARS);

    match (subheading, bullet_text(line), is_quote(line)) {
        (Some(text), _, _) => LineKind::Subheading(text),
        (None, Some(text), _) => LineKind::Bullet(text),
        (None, None, true) => LineKind::Quote(line),
        (None, None, false) => LineKind::Paragraph(line),
    }
}

/// Text of a bullet line with its marker removed
///
/// A line led by `**` counts as a bullet whose first span is emphasized;
/// nothing is stripped from it.
fn bullet_text(line: &str) -> Option<&str> {
    if line.starts_with(STRONG) {
        return Some(line);
    }
    BULLET_MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim_start)
}

fn is_quote(line: &str) -> bool {
    line.chars().count() >= 2 && line.starts_with('"') && line.ends_with('"')
}

/// Split bullet text on `**` into alternating plain and strong spans
///
/// The first span is always plain (possibly empty), so one delimiter pair
/// yields exactly three spans.
pub fn bullet_spans(text: &str) -> Vec<Span> {
    text.split(STRONG)
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                Span::strong(part)
            } else {
                Span::plain(part)
            }
        })
        .collect()
}

/// Split text into paragraphs of trimmed, non-empty lines
///
/// Paragraphs are separated by one or more blank (or whitespace-only) lines.
pub fn split_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

/// Builds the block sequence of one report
#[derive(Debug, Clone)]
pub struct ReportStructurer<'a> {
    theme: &'a ThemeDescriptor,
    /// Banner image placed above the title when it exists
    banner: Option<PathBuf>,
    /// Date printed in the footer
    generated_on: NaiveDate,
}

impl<'a> ReportStructurer<'a> {
    /// Create a structurer for a theme, dated today
    pub fn new(theme: &'a ThemeDescriptor) -> Self {
        Self {
            theme,
            banner: None,
            generated_on: chrono::Local::now().date_naive(),
        }
    }

    /// Set the banner image path
    pub fn with_banner(mut self, path: impl Into<PathBuf>) -> Self {
        self.banner = Some(path.into());
        self
    }

    /// Set the footer date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    /// Build the complete block sequence
    ///
    /// Missing banner and photo files are skipped; this never fails.
    pub fn structure(
        &self,
        details: &EventDetails,
        report_text: &str,
        photos: &[PathBuf],
    ) -> Vec<Block> {
        let mut blocks = Vec::new();

        if let Some(banner) = self.banner.as_deref().filter(|p| p.is_file()) {
            blocks.push(self.picture(banner, None, BANNER_WIDTH_INCHES));
        }

        blocks.push(Block::Title(TextBlock::new(
            format!("{} - Report", details.get_or("event_title", "Event")),
            self.theme.title_style(),
        )));
        blocks.push(Block::SubtitleInfo(TextBlock::new(
            format!(
                "{}\n{}",
                details.get_or("college_name", ""),
                details.get_or("dept_name", "")
            ),
            self.theme.subtitle_style(),
        )));

        blocks.extend(self.structure_text(report_text));
        self.push_participants(&mut blocks, details, report_text);
        self.push_photos(&mut blocks, photos);

        blocks.push(Block::Footer(TextBlock::new(
            format!(
                "Report generated on: {}",
                self.generated_on.format("%d %B %Y")
            ),
            self.theme.footer_style(),
        )));

        debug!("Structured report into {} blocks", blocks.len());
        blocks
    }

    /// Blocks for the report body text alone
    pub fn structure_text(&self, report_text: &str) -> Vec<Block> {
        let mut blocks = Vec::new();

        for lines in split_paragraphs(report_text) {
            let Some((first, rest)) = lines.split_first() else {
                continue;
            };

            let Some(heading) = strip_strong(first) else {
                blocks.push(Block::Paragraph(TextBlock::new(
                    lines.join("\n"),
                    self.theme.body_style(),
                )));
                continue;
            };

            blocks.push(Block::SectionHeading(TextBlock::new(
                heading,
                self.theme.section_heading_style(),
            )));
            for line in rest {
                blocks.push(self.line_block(classify_line(line)));
            }
        }

        blocks
    }

    fn line_block(&self, kind: LineKind<'_>) -> Block {
        debug!("Classified line as {:?}", kind);
        match kind {
            LineKind::Subheading(text) => Block::SubsectionHeading(TextBlock::new(
                text,
                self.theme.subsection_heading_style(),
            )),
            LineKind::Bullet(text) => Block::BulletItem(BulletItem {
                spans: bullet_spans(text),
                style: self.theme.bullet_style(),
            }),
            LineKind::Quote(text) => {
                Block::Quote(TextBlock::new(text, self.theme.quote_style()))
            }
            LineKind::Paragraph(text) => {
                Block::Paragraph(TextBlock::new(text, self.theme.body_style()))
            }
        }
    }

    /// Heading whenever the participants field has any non-blank text, then
    /// one bullet per non-empty name
    fn push_participants(&self, blocks: &mut Vec<Block>, details: &EventDetails, text: &str) {
        let listed = details
            .participants
            .as_deref()
            .is_some_and(|list| !list.trim().is_empty());
        if !listed || text.to_lowercase().contains("participants") {
            return;
        }

        blocks.push(Block::SectionHeading(TextBlock::new(
            PARTICIPANTS_HEADING,
            self.theme.section_heading_style(),
        )));
        for name in details.participant_names() {
            blocks.push(Block::BulletItem(BulletItem::plain(
                name,
                self.theme.bullet_style(),
            )));
        }
    }

    fn push_photos(&self, blocks: &mut Vec<Block>, photos: &[PathBuf]) {
        if photos.is_empty() {
            return;
        }

        blocks.push(Block::SectionHeading(TextBlock::new(
            PHOTOS_HEADING,
            self.theme.section_heading_style(),
        )));

        let mut figure = 0;
        for photo in photos {
            if !photo.is_file() {
                debug!("Skipping missing photo: {}", photo.display());
                continue;
            }
            figure += 1;
            let caption = format!("Figure {}: Event Photo", figure);
            blocks.push(self.picture(photo, Some(caption), PHOTO_WIDTH_INCHES));
        }
    }

    fn picture(&self, path: &Path, caption: Option<String>, width_inches: f32) -> Block {
        Block::Photo(PhotoBlock {
            path: path.to_path_buf(),
            caption,
            width_inches,
            style: self.theme.picture_style(),
            caption_style: self.theme.caption_style(),
        })
    }
}
