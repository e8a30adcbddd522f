//! DOCX Writer
//!
//! This module renders a report block sequence into a complete DOCX
//! package. No template is needed: styles, numbering and package parts are
//! generated from the blocks.
//!
//! # Example
//!
//! ```no_run
//! use eventdok_ast::{Block, BlockStyle, TextBlock};
//! use eventdok_ooxml::DocxWriter;
//!
//! let blocks = vec![Block::Title(TextBlock::new(
//!     "AI Workshop - Report",
//!     BlockStyle::new("Calibri", 16).with_style_id("ReportTitle").bold(),
//! ))];
//! let path = DocxWriter::save(&blocks, "ai_workshop.docx", "generated_reports")?;
//! println!("{}", path.display());
//! # Ok::<(), eventdok_ooxml::OoxmlError>(())
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use eventdok_ast::{Block, BlockStyle, BulletItem, PhotoBlock, Span, TextBlock};
use tracing::{debug, info, warn};

use crate::archive::OoxmlArchive;
use crate::error::Result;
use crate::image::{content_hash, extent_for_width, media_extension};
use crate::package::{content_types_xml, core_xml, package_rels_xml};
use crate::relationships::Relationships;
use crate::styles::{
    direct_run_properties, escape_xml, numbering_xml, paragraph_properties, StyleSheet, WORDML_NS,
};

/// US Letter page with 1 inch margins, in twips
const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#;

/// DOCX Writer for report block sequences
pub struct DocxWriter {
    /// document.xml output buffer
    output: String,
    /// Document relationships (word/_rels/document.xml.rels)
    relationships: Relationships,
    /// Media parts to embed (part path, bytes)
    media_files: Vec<(String, Vec<u8>)>,
    /// Relationship ID of already embedded media, keyed by content hash
    media_by_hash: HashMap<String, String>,
    /// Extensions of embedded media, for the content-type map
    media_extensions: BTreeSet<String>,
    /// Next image number for media part names
    next_image_id: usize,
    /// Next drawing ID for docPr
    next_drawing_id: usize,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxWriter {
    /// Create a new writer
    pub fn new() -> Self {
        Self {
            output: String::new(),
            relationships: Relationships::new(),
            media_files: Vec::new(),
            media_by_hash: HashMap::new(),
            media_extensions: BTreeSet::new(),
            next_image_id: 1,
            next_drawing_id: 1,
        }
    }

    /// Render blocks to DOCX bytes
    pub fn generate(blocks: &[Block]) -> Result<Vec<u8>> {
        Self::new().build_archive(blocks).to_bytes()
    }

    /// Render blocks and write the file
    ///
    /// An `output_name` with directory components is used as given;
    /// a bare file name is placed under `output_dir`. Missing directories
    /// are created. Returns the path written.
    pub fn save(
        blocks: &[Block],
        output_name: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let path = resolve_output_path(output_name.as_ref(), output_dir.as_ref());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let bytes = Self::generate(blocks)?;
        std::fs::write(&path, bytes)?;

        info!("Saved report: {}", path.display());
        Ok(path)
    }

    /// Render blocks into an in-memory package
    pub fn build_archive(mut self, blocks: &[Block]) -> OoxmlArchive {
        self.relationships.add("styles.xml", Relationships::TYPE_STYLES);
        self.relationships
            .add("numbering.xml", Relationships::TYPE_NUMBERING);

        let document_xml = self.generate_document_xml(blocks);
        let title = blocks.iter().find_map(|b| match b {
            Block::Title(t) => Some(t.text.as_str()),
            _ => None,
        });

        let mut archive = OoxmlArchive::new();
        archive.set_string("[Content_Types].xml", content_types_xml(&self.media_extensions));
        archive.set_string("_rels/.rels", package_rels_xml());
        archive.set_string("docProps/core.xml", core_xml(title));
        archive.set_string("word/document.xml", document_xml);
        archive.set_string("word/styles.xml", StyleSheet::from_blocks(blocks).to_xml());
        archive.set_string("word/numbering.xml", numbering_xml());
        archive.set_string("word/_rels/document.xml.rels", self.relationships.to_xml());
        for (path, data) in self.media_files {
            archive.set(path, data);
        }

        archive
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, blocks: &[Block]) -> String {
        self.output.clear();

        // XML declaration and document root with all required namespaces
        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output.push_str(&format!(r#"<w:document xmlns:w="{}" "#, WORDML_NS));
        self.output.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        );
        self.output.push_str(
            r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
        );
        self.output
            .push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        self.output
            .push_str(r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#);
        self.output.push('\n');
        self.output.push_str("<w:body>\n");

        for block in blocks {
            self.generate_block(block);
        }

        self.output.push_str(SECTION_PROPERTIES);
        self.output.push('\n');
        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        std::mem::take(&mut self.output)
    }

    fn generate_block(&mut self, block: &Block) {
        debug!("Writing {} block", block.kind());
        match block {
            Block::Title(b)
            | Block::SubtitleInfo(b)
            | Block::SectionHeading(b)
            | Block::SubsectionHeading(b)
            | Block::Quote(b)
            | Block::Paragraph(b)
            | Block::Footer(b) => self.generate_text_paragraph(b),
            Block::BulletItem(item) => self.generate_bullet(item),
            Block::Photo(photo) => self.generate_photo(photo),
        }
    }

    /// A paragraph holding a single run of text
    fn generate_text_paragraph(&mut self, block: &TextBlock) {
        self.output.push_str("<w:p>");
        self.output
            .push_str(&paragraph_properties(&block.style, true, false));
        self.generate_run(&block.text, &block.style, false);
        self.output.push_str("</w:p>\n");
    }

    fn generate_bullet(&mut self, item: &BulletItem) {
        self.output.push_str("<w:p>");
        self.output
            .push_str(&paragraph_properties(&item.style, true, true));
        for Span { text, strong } in &item.spans {
            self.generate_run(text, &item.style, *strong);
        }
        self.output.push_str("</w:p>\n");
    }

    /// A run with direct formatting; `\n` becomes a line break
    fn generate_run(&mut self, text: &str, style: &BlockStyle, strong: bool) {
        if text.is_empty() {
            return;
        }

        self.output.push_str("<w:r>");
        self.output.push_str(&direct_run_properties(style, strong));
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.output.push_str("<w:br/>");
            }
            if !line.is_empty() {
                self.output.push_str(&format!(
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    escape_xml(line)
                ));
            }
        }
        self.output.push_str("</w:r>");
    }

    /// Picture paragraph, followed by its caption paragraph
    ///
    /// An image that cannot be read is skipped together with its caption.
    fn generate_photo(&mut self, photo: &PhotoBlock) {
        let data = match std::fs::read(&photo.path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Skipping image {}: {}", photo.path.display(), e);
                return;
            }
        };

        let (cx, cy) = extent_for_width(&data, f64::from(photo.width_inches));
        let rel_id = self.embed_media(&photo.path, data);
        let drawing_id = self.next_drawing_id;
        self.next_drawing_id += 1;

        self.output.push_str("<w:p>");
        self.output
            .push_str(&paragraph_properties(&photo.style, true, false));
        self.generate_drawing_xml(drawing_id, &rel_id, cx, cy, photo.caption.as_deref());
        self.output.push_str("</w:p>\n");

        if let Some(caption) = &photo.caption {
            self.generate_text_paragraph(&TextBlock::new(
                caption.clone(),
                photo.caption_style.clone(),
            ));
        }
    }

    /// Add media once per distinct content and return its relationship ID
    fn embed_media(&mut self, path: &Path, data: Vec<u8>) -> String {
        let hash = content_hash(&data);
        if let Some(rel_id) = self.media_by_hash.get(&hash) {
            debug!("Reusing embedded media for {}", path.display());
            return rel_id.clone();
        }

        let ext = media_extension(&data, path);
        let name = format!("image{}.{}", self.next_image_id, ext);
        self.next_image_id += 1;

        let rel_id = self
            .relationships
            .add(format!("media/{}", name), Relationships::TYPE_IMAGE);
        self.media_files.push((format!("word/media/{}", name), data));
        self.media_extensions.insert(ext);
        self.media_by_hash.insert(hash, rel_id.clone());
        rel_id
    }

    /// Generate the inline `<w:drawing>` run for an embedded image
    fn generate_drawing_xml(
        &mut self,
        drawing_id: usize,
        rel_id: &str,
        cx: i64,
        cy: i64,
        descr: Option<&str>,
    ) {
        let descr = escape_xml(descr.unwrap_or_default());
        self.output.push_str(&format!(
            r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="Picture {id}" descr="{descr}"/><wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="Picture {id}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
            cx = cx,
            cy = cy,
            id = drawing_id,
            descr = descr,
            rel_id = rel_id,
        ));
    }
}

/// Final path for a report file
///
/// A name with directory components is used verbatim; a bare file name is
/// joined to `output_dir`.
pub fn resolve_output_path(output_name: &Path, output_dir: &Path) -> PathBuf {
    let has_dir = output_name
        .parent()
        .is_some_and(|p| !p.as_os_str().is_empty());
    if has_dir {
        output_name.to_path_buf()
    } else {
        output_dir.join(output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{extract_file, write_png};
    use eventdok_ast::Alignment;

    fn body() -> BlockStyle {
        BlockStyle::new("Calibri", 11)
            .with_style_id("BodyTextCustom")
            .with_spacing(0, 8)
            .with_line_spacing(1.2)
    }

    fn photo(path: PathBuf, caption: Option<&str>) -> Block {
        Block::Photo(PhotoBlock {
            path,
            caption: caption.map(str::to_string),
            width_inches: 4.5,
            style: BlockStyle::new("Calibri", 11).aligned(Alignment::Center),
            caption_style: BlockStyle::new("Calibri", 10).italic(),
        })
    }

    #[test]
    fn test_resolve_output_path() {
        let dir = Path::new("generated_reports");
        assert_eq!(
            resolve_output_path(Path::new("report.docx"), dir),
            PathBuf::from("generated_reports/report.docx")
        );
        assert_eq!(
            resolve_output_path(Path::new("out/report.docx"), dir),
            PathBuf::from("out/report.docx")
        );
        assert_eq!(
            resolve_output_path(Path::new("/tmp/report.docx"), dir),
            PathBuf::from("/tmp/report.docx")
        );
    }

    #[test]
    fn test_line_breaks_in_text() {
        let blocks = vec![Block::SubtitleInfo(TextBlock::new(
            "X College\nDept Y",
            BlockStyle::new("Calibri", 12).italic(),
        ))];
        let docx = DocxWriter::generate(&blocks).unwrap();
        let xml = extract_file(&docx, "word/document.xml").unwrap();
        assert!(xml.contains(
            r#"<w:t xml:space="preserve">X College</w:t><w:br/><w:t xml:space="preserve">Dept Y</w:t>"#
        ));
    }

    #[test]
    fn test_bullet_spans_become_runs() {
        let blocks = vec![Block::BulletItem(BulletItem {
            spans: vec![Span::plain(""), Span::strong("Date:"), Span::plain(" 5 March")],
            style: BlockStyle::new("Calibri", 11).with_style_id("ListBullet"),
        })];
        let docx = DocxWriter::generate(&blocks).unwrap();
        let xml = extract_file(&docx, "word/document.xml").unwrap();

        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/><w:numPr>"#));
        // empty leading span writes no run
        assert_eq!(xml.matches("<w:r>").count(), 2);
        assert!(xml.contains(r#"<w:b/><w:bCs/><w:i w:val="0"/><w:iCs w:val="0"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr><w:t xml:space="preserve">Date:</w:t>"#));
    }

    #[test]
    fn test_quote_does_not_italicize_later_paragraphs() {
        let blocks = vec![
            Block::Quote(TextBlock::new("\"Inspiring\"", body().italic())),
            Block::Paragraph(TextBlock::new("Plain body", body())),
        ];
        let docx = DocxWriter::generate(&blocks).unwrap();
        let xml = extract_file(&docx, "word/document.xml").unwrap();

        // the shared style takes the quote's italics; the paragraph run overrides it
        assert!(xml.contains(
            r#"<w:i w:val="0"/><w:iCs w:val="0"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr><w:t xml:space="preserve">Plain body</w:t>"#
        ));
        assert!(xml.contains(
            r#"<w:i/><w:iCs/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr><w:t xml:space="preserve">&quot;Inspiring&quot;</w:t>"#
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let blocks = vec![Block::Paragraph(TextBlock::new("R&D <lab>", body()))];
        let docx = DocxWriter::generate(&blocks).unwrap();
        let xml = extract_file(&docx, "word/document.xml").unwrap();
        assert!(xml.contains("R&amp;D &lt;lab&gt;"));
    }

    #[test]
    fn test_identical_images_embedded_once() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        write_png(&a, 40, 30);
        write_png(&b, 40, 30);

        let blocks = vec![photo(a, Some("Figure 1: Event Photo")), photo(b, Some("Figure 2: Event Photo"))];
        let docx = DocxWriter::generate(&blocks).unwrap();
        let archive = OoxmlArchive::from_bytes(&docx).unwrap();

        let media: Vec<&str> = archive
            .file_list()
            .into_iter()
            .filter(|p| p.starts_with("word/media/"))
            .collect();
        assert_eq!(media, vec!["word/media/image1.png"]);

        let xml = archive.get_string("word/document.xml").unwrap();
        assert_eq!(xml.matches("<w:drawing>").count(), 2);
        assert_eq!(xml.matches(r#"r:embed="rId3""#).count(), 2);
    }

    #[test]
    fn test_extent_follows_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_png(&path, 200, 100);

        let docx = DocxWriter::generate(&[photo(path, None)]).unwrap();
        let xml = extract_file(&docx, "word/document.xml").unwrap();
        assert!(xml.contains(r#"<wp:extent cx="4114800" cy="2057400"/>"#));
    }

    #[test]
    fn test_unreadable_photo_skipped_with_caption() {
        let blocks = vec![
            photo(PathBuf::from("/nonexistent/photo.png"), Some("Figure 1: Event Photo")),
            Block::Paragraph(TextBlock::new("after", body())),
        ];
        let docx = DocxWriter::generate(&blocks).unwrap();
        let xml = extract_file(&docx, "word/document.xml").unwrap();
        assert!(!xml.contains("<w:drawing>"));
        assert!(!xml.contains("Figure 1"));
        assert!(xml.contains("after"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let blocks = vec![
            Block::Title(TextBlock::new("T - Report", BlockStyle::new("Calibri", 16))),
            Block::Paragraph(TextBlock::new("Body", body())),
        ];
        assert_eq!(
            DocxWriter::generate(&blocks).unwrap(),
            DocxWriter::generate(&blocks).unwrap()
        );
    }

    #[test]
    fn test_save_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("generated_reports");
        let blocks = vec![Block::Paragraph(TextBlock::new("Body", body()))];

        let path = DocxWriter::save(&blocks, "report.docx", &out_dir).unwrap();
        assert_eq!(path, out_dir.join("report.docx"));
        assert!(path.is_file());
    }
}
