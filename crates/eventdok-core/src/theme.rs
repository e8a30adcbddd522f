//! Theme registry
//!
//! A theme is a named bundle of font, color and size choices applied
//! uniformly to one report. The registry is fixed at startup and queried by
//! exact name; [`ThemeDescriptor`] resolves the per-block styles the
//! structuring engine attaches to every block.

use eventdok_ast::{Alignment, BlockStyle};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Theme used when none is requested
pub const DEFAULT_THEME: &str = "Academic Blue";

/// Subsection headings use a fixed size independent of the theme
const SUBSECTION_SIZE_PT: u8 = 12;
const SUBTITLE_SIZE_PT: u8 = 12;
const CAPTION_SIZE_PT: u8 = 10;
const FOOTER_SIZE_PT: u8 = 9;
const FOOTER_COLOR: &str = "666666";

/// Font, color and size choices for one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDescriptor {
    /// Font family used for every block
    pub font: String,
    /// Title and section heading color (RGB hex)
    pub heading_color: String,
    /// Subsection heading color (RGB hex)
    pub accent_color: String,
    pub title_size: u8,
    pub heading_size: u8,
    pub body_size: u8,
}

impl ThemeDescriptor {
    fn new(font: &str, heading_color: &str, accent_color: &str, sizes: (u8, u8, u8)) -> Self {
        Self {
            font: font.to_string(),
            heading_color: heading_color.to_string(),
            accent_color: accent_color.to_string(),
            title_size: sizes.0,
            heading_size: sizes.1,
            body_size: sizes.2,
        }
    }

    pub fn title_style(&self) -> BlockStyle {
        BlockStyle::new(&self.font, self.title_size)
            .with_style_id("ReportTitle")
            .with_color(&self.heading_color)
            .bold()
            .aligned(Alignment::Center)
            .with_spacing(8, 16)
    }

    pub fn subtitle_style(&self) -> BlockStyle {
        BlockStyle::new(&self.font, SUBTITLE_SIZE_PT)
            .italic()
            .aligned(Alignment::Center)
            .with_spacing(0, 12)
    }

    pub fn section_heading_style(&self) -> BlockStyle {
        BlockStyle::new(&self.font, self.heading_size)
            .with_style_id("SectionHeading")
            .with_color(&self.heading_color)
            .bold()
            .with_spacing(16, 8)
    }

    pub fn subsection_heading_style(&self) -> BlockStyle {
        BlockStyle::new(&self.font, SUBSECTION_SIZE_PT)
            .with_style_id("SubsectionHeading")
            .with_color(&self.accent_color)
            .bold()
            .with_spacing(8, 4)
    }

    pub fn body_style(&self) -> BlockStyle {
        BlockStyle::new(&self.font, self.body_size)
            .with_style_id("BodyTextCustom")
            .with_spacing(0, 8)
            .with_line_spacing(1.2)
    }

    /// Italic body text under its own style id
    pub fn quote_style(&self) -> BlockStyle {
        self.body_style().with_style_id("QuoteText").italic()
    }

    pub fn bullet_style(&self) -> BlockStyle {
        BlockStyle::new(&self.font, self.body_size).with_style_id("ListBullet")
    }

    /// Paragraph holding an embedded picture
    pub fn picture_style(&self) -> BlockStyle {
        BlockStyle::new(&self.font, self.body_size).aligned(Alignment::Center)
    }

    pub fn caption_style(&self) -> BlockStyle {
        BlockStyle::new(&self.font, CAPTION_SIZE_PT)
            .italic()
            .aligned(Alignment::Center)
            .with_spacing(0, 8)
    }

    pub fn footer_style(&self) -> BlockStyle {
        BlockStyle::new(&self.font, FOOTER_SIZE_PT)
            .with_color(FOOTER_COLOR)
            .italic()
            .aligned(Alignment::Right)
            .with_spacing(12, 0)
    }
}

/// Fixed mapping from theme name to descriptor
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    /// Themes in registration order
    themes: Vec<(String, ThemeDescriptor)>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeRegistry {
    /// The built-in themes
    pub fn builtin() -> Self {
        let themes = vec![
            (
                "Academic Blue",
                ThemeDescriptor::new("Calibri", "1F4E79", "2E75B6", (16, 14, 11)),
            ),
            (
                "Professional Black",
                ThemeDescriptor::new("Arial", "2F2F2F", "4F4F4F", (16, 14, 11)),
            ),
            (
                "Elegant Navy",
                ThemeDescriptor::new("Times New Roman", "1C2951", "34558B", (16, 14, 12)),
            ),
            (
                "Modern Corporate",
                ThemeDescriptor::new("Segoe UI", "0066CC", "4488DD", (17, 14, 11)),
            ),
        ];

        Self {
            themes: themes
                .into_iter()
                .map(|(name, theme)| (name.to_string(), theme))
                .collect(),
        }
    }

    /// Look a theme up by exact name
    pub fn get(&self, name: &str) -> Result<&ThemeDescriptor> {
        self.themes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, theme)| theme)
            .ok_or_else(|| CoreError::UnknownTheme(name.to_string()))
    }

    /// Registered theme names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.themes.iter().map(|(n, _)| n.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec![
                "Academic Blue",
                "Professional Black",
                "Elegant Navy",
                "Modern Corporate"
            ]
        );
        assert!(registry.get(DEFAULT_THEME).is_ok());
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = ThemeRegistry::builtin();
        let navy = registry.get("Elegant Navy").unwrap();
        assert_eq!(navy.font, "Times New Roman");
        assert_eq!(navy.body_size, 12);

        assert!(matches!(
            registry.get("elegant navy"),
            Err(CoreError::UnknownTheme(name)) if name == "elegant navy"
        ));
    }

    #[test]
    fn test_heading_styles_use_theme_colors() {
        let registry = ThemeRegistry::builtin();
        let blue = registry.get("Academic Blue").unwrap();

        let section = blue.section_heading_style();
        assert_eq!(section.color.as_deref(), Some("1F4E79"));
        assert_eq!(section.size_pt, 14);
        assert!(section.bold);

        let sub = blue.subsection_heading_style();
        assert_eq!(sub.color.as_deref(), Some("2E75B6"));
        assert_eq!(sub.size_pt, 12);
    }

    #[test]
    fn test_quote_is_italic_body() {
        let registry = ThemeRegistry::builtin();
        let corporate = registry.get("Modern Corporate").unwrap();
        let quote = corporate.quote_style();
        assert!(quote.italic);
        assert_eq!(quote.style_id.as_deref(), Some("QuoteText"));
        assert_eq!(quote.font, "Segoe UI");
        assert_eq!(quote.size_pt, corporate.body_size);
    }

    #[test]
    fn test_footer_style() {
        let registry = ThemeRegistry::builtin();
        let footer = registry.get("Professional Black").unwrap().footer_style();
        assert_eq!(footer.alignment, Alignment::Right);
        assert_eq!(footer.color.as_deref(), Some("666666"));
        assert_eq!(footer.size_pt, 9);
    }
}
