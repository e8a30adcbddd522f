//! Fixed package parts
//!
//! A report package is built from scratch, so the content-type map,
//! package relationships and core properties are generated here rather
//! than copied from a template.

use std::collections::BTreeSet;

use crate::image::content_type_for_extension;
use crate::relationships::Relationships;
use crate::styles::escape_xml;

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// [Content_Types].xml for a package with the given media extensions
pub fn content_types_xml(media_extensions: &BTreeSet<String>) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<Types xmlns="{}">"#, CONTENT_TYPES_NS));
    xml.push('\n');
    xml.push_str(r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push('\n');
    xml.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push('\n');

    for ext in media_extensions {
        xml.push_str(&format!(
            "  <Default Extension=\"{}\" ContentType=\"{}\"/>\n",
            escape_xml(ext),
            content_type_for_extension(ext)
        ));
    }

    for (part, content_type) in [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/numbering.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
    ] {
        xml.push_str(&format!(
            "  <Override PartName=\"{}\" ContentType=\"{}\"/>\n",
            part, content_type
        ));
    }

    xml.push_str("</Types>");
    xml
}

/// _rels/.rels
pub fn package_rels_xml() -> String {
    let mut rels = Relationships::new();
    rels.add("word/document.xml", Relationships::TYPE_OFFICE_DOCUMENT);
    rels.add("docProps/core.xml", Relationships::TYPE_CORE_PROPERTIES);
    rels.to_xml()
}

/// docProps/core.xml
pub fn core_xml(title: Option<&str>) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    if let Some(title) = title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }
    xml.push_str(&format!(
        "<dc:creator>eventdok {}</dc:creator>",
        crate::VERSION
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}
