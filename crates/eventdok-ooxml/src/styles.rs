//! Style definitions (word/styles.xml and word/numbering.xml)
//!
//! Styles are generated from the blocks themselves: every distinct
//! `style_id` becomes a paragraph style carrying the formatting of the
//! first block that uses it. Blocks also repeat their formatting as direct
//! properties, so a document renders the same whether or not a consumer
//! honors the named styles.

use std::collections::HashMap;

use eventdok_ast::{Alignment, Block, BlockStyle};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// WordprocessingML main namespace
pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Numbering instance used by bullet paragraphs
pub const BULLET_NUM_ID: u32 = 1;

/// Style ids that name built-in Word styles
const BUILTIN_STYLE_IDS: &[&str] = &["ListBullet"];

/// Twips (1/20 pt) per point
const TWIPS_PER_POINT: u32 = 20;

/// `w:line` value for single spacing
const SINGLE_LINE: f32 = 240.0;

/// A named paragraph style
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Style ID (used in `w:pStyle`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Formatting, when generated from a block
    pub format: Option<BlockStyle>,
}

/// Paragraph styles of one document, in first-use order
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: Vec<Style>,
    /// Font for document defaults
    default_font: Option<String>,
}

impl StyleSheet {
    /// Collect the named styles used by a block sequence
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let mut sheet = Self::default();

        for block in blocks {
            let style = block.style();
            if sheet.default_font.is_none() {
                sheet.default_font = Some(style.font.clone());
            }
            if let Some(id) = &style.style_id {
                if sheet.get(id).is_none() {
                    sheet.styles.push(Style {
                        id: id.clone(),
                        name: display_name(id),
                        format: Some(style.clone()),
                    });
                }
            }
        }

        sheet
    }

    /// Parse style ids and names from styles.xml
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut sheet = Self::default();
        let mut current: Option<Style> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"style" => {
                    let id = e
                        .attributes()
                        .filter_map(|a| a.ok())
                        .find(|a| a.key.local_name().as_ref() == b"styleId")
                        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()));
                    current = id.map(|id| Style {
                        name: id.clone(),
                        id,
                        format: None,
                    });
                }
                Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"name" => {
                    if let Some(style) = current.as_mut() {
                        if let Some(name) = e
                            .attributes()
                            .filter_map(|a| a.ok())
                            .find(|a| a.key.local_name().as_ref() == b"val")
                            .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
                        {
                            style.name = name;
                        }
                    }
                }
                Ok(Event::End(ref e)) if e.local_name().as_ref() == b"style" => {
                    if let Some(style) = current.take() {
                        sheet.styles.push(style);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }

    /// Look a style up by ID
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// All styles in first-use order
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Serialize to word/styles.xml
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, WORDML_NS));
        xml.push('\n');

        // Document defaults: explicit spacing on each style governs layout
        xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
        if let Some(font) = &self.default_font {
            xml.push_str(&fonts_xml(font));
        }
        xml.push_str("</w:rPr></w:rPrDefault>");
        xml.push_str(r#"<w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#);
        xml.push_str("</w:docDefaults>\n");

        xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#);
        xml.push('\n');

        for style in &self.styles {
            let custom = if BUILTIN_STYLE_IDS.contains(&style.id.as_str()) {
                ""
            } else {
                r#" w:customStyle="1""#
            };
            xml.push_str(&format!(
                r#"<w:style w:type="paragraph"{} w:styleId="{}"><w:name w:val="{}"/><w:basedOn w:val="Normal"/><w:qFormat/>"#,
                custom,
                escape_xml(&style.id),
                escape_xml(&style.name)
            ));
            if let Some(format) = &style.format {
                xml.push_str(&paragraph_properties(
                    format,
                    false,
                    style.id == "ListBullet",
                ));
                xml.push_str(&run_properties(format, false));
            }
            xml.push_str("</w:style>\n");
        }

        xml.push_str("</w:styles>");
        xml
    }
}

/// word/numbering.xml with one single-level bullet list
pub fn numbering_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="{ns}">
<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="{bullet}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr><w:rPr><w:rFonts w:ascii="Symbol" w:hAnsi="Symbol" w:hint="default"/></w:rPr></w:lvl></w:abstractNum>
<w:num w:numId="{num_id}"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#,
        ns = WORDML_NS,
        bullet = "\u{f0b7}",
        num_id = BULLET_NUM_ID,
    )
}

/// `<w:pPr>` for a block style
///
/// `with_style_ref` adds the `w:pStyle` reference; `bullet` adds the list
/// numbering reference.
pub(crate) fn paragraph_properties(style: &BlockStyle, with_style_ref: bool, bullet: bool) -> String {
    let mut xml = String::from("<w:pPr>");

    if with_style_ref {
        if let Some(id) = &style.style_id {
            xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(id)));
        }
    }
    if bullet {
        xml.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
            BULLET_NUM_ID
        ));
    }

    let mut spacing = String::new();
    if let Some(before) = style.space_before_pt {
        spacing.push_str(&format!(r#" w:before="{}""#, u32::from(before) * TWIPS_PER_POINT));
    }
    if let Some(after) = style.space_after_pt {
        spacing.push_str(&format!(r#" w:after="{}""#, u32::from(after) * TWIPS_PER_POINT));
    }
    if let Some(multiplier) = style.line_spacing {
        spacing.push_str(&format!(
            r#" w:line="{}" w:lineRule="auto""#,
            (multiplier * SINGLE_LINE).round() as u32
        ));
    }
    if !spacing.is_empty() {
        xml.push_str(&format!("<w:spacing{}/>", spacing));
    }

    if style.alignment != Alignment::Left {
        xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, style.alignment.ooxml_value()));
    }

    xml.push_str("</w:pPr>");
    xml
}

/// `<w:rPr>` for a style definition; `strong` forces bold
pub(crate) fn run_properties(style: &BlockStyle, strong: bool) -> String {
    toggle_run_properties(style, strong, false)
}

/// `<w:rPr>` for a run in document.xml
///
/// Bold and italic are written as explicit on/off toggles, so a run never
/// inherits emphasis from the named paragraph style.
pub(crate) fn direct_run_properties(style: &BlockStyle, strong: bool) -> String {
    toggle_run_properties(style, strong, true)
}

fn toggle_run_properties(style: &BlockStyle, strong: bool, explicit_off: bool) -> String {
    let mut xml = String::from("<w:rPr>");
    xml.push_str(&fonts_xml(&style.font));
    if style.bold || strong {
        xml.push_str("<w:b/><w:bCs/>");
    } else if explicit_off {
        xml.push_str(r#"<w:b w:val="0"/><w:bCs w:val="0"/>"#);
    }
    if style.italic {
        xml.push_str("<w:i/><w:iCs/>");
    } else if explicit_off {
        xml.push_str(r#"<w:i w:val="0"/><w:iCs w:val="0"/>"#);
    }
    if let Some(color) = &style.color {
        xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_xml(color)));
    }
    xml.push_str(&format!(
        r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
        style.half_points()
    ));
    xml.push_str("</w:rPr>");
    xml
}

fn fonts_xml(font: &str) -> String {
    let font = escape_xml(font);
    format!(
        r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:eastAsia="{0}" w:cs="{0}"/>"#,
        font
    )
}

/// "BodyTextCustom" -> "Body Text Custom"
fn display_name(id: &str) -> String {
    let mut name = String::with_capacity(id.len() + 4);
    for (i, c) in id.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            name.push(' ');
        }
        name.push(c);
    }
    name
}

/// Escape text for XML content and attribute values
///
/// Characters not allowed in XML 1.0 are dropped.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c < ' ' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Count style references in document.xml, keyed by style ID
pub fn style_usage(document_xml: &[u8]) -> Result<HashMap<String, usize>> {
    let mut reader = Reader::from_reader(document_xml);
    let mut usage = HashMap::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"pStyle" => {
                if let Some(val) = e
                    .attributes()
                    .filter_map(|a| a.ok())
                    .find(|a| a.key.local_name().as_ref() == b"val")
                    .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
                {
                    *usage.entry(val).or_insert(0) += 1;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(usage)
}
