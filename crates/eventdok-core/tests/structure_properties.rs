//! Behavioral tests for the structuring engine
//!
//! Each test pins one observable property of the block sequence produced
//! from report text, event details and photos.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use eventdok_ast::{Block, Span};
use eventdok_core::{
    fallback_report, EventDetails, ReportStructurer, ThemeDescriptor, ThemeRegistry,
};

fn theme() -> ThemeDescriptor {
    ThemeRegistry::builtin().get("Academic Blue").unwrap().clone()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

fn write_png(path: &Path) {
    image::RgbImage::from_pixel(8, 6, image::Rgb([200, 30, 30]))
        .save(path)
        .unwrap();
}

/// (kind, text) pairs for compact assertions
fn summary(blocks: &[Block]) -> Vec<(&'static str, String)> {
    blocks.iter().map(|b| (b.kind(), b.text())).collect()
}

#[test]
fn test_round_trip_scenario() {
    let theme = theme();
    let details = EventDetails {
        event_title: Some("AI Workshop".to_string()),
        college_name: Some("X College".to_string()),
        dept_name: Some("Dept Y".to_string()),
        participants: Some("A, B".to_string()),
        ..Default::default()
    };

    let blocks = ReportStructurer::new(&theme)
        .with_date(date())
        .structure(&details, "**1. Intro**\nSome text", &[]);

    assert_eq!(
        summary(&blocks),
        vec![
            ("title", "AI Workshop - Report".to_string()),
            ("subtitle", "X College\nDept Y".to_string()),
            ("section", "1. Intro".to_string()),
            ("paragraph", "Some text".to_string()),
            ("section", "Additional Participants".to_string()),
            ("bullet", "A".to_string()),
            ("bullet", "B".to_string()),
            ("footer", "Report generated on: 05 March 2024".to_string()),
        ]
    );
}

#[test]
fn test_every_line_yields_a_block() {
    let theme = theme();
    let text = "**1. Intro**\nline one\n* bullet\n\"quote\"\n**Sub**\n\n\
                Loose paragraph\ncontinued\n\n\
                **2. Next**\nfinal line";

    let blocks = ReportStructurer::new(&theme).structure_text(text);
    let kinds: Vec<&str> = blocks.iter().map(Block::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "section",
            "paragraph",
            "bullet",
            "quote",
            "subsection",
            "paragraph",
            "section",
            "paragraph"
        ]
    );
    assert_eq!(blocks[5].text(), "Loose paragraph\ncontinued");
}

#[test]
fn test_heading_strip_keeps_content() {
    let theme = theme();
    for inner in ["1. Intro", "Q&A: \"Why?\"", "* not a bullet", "a **b** c"] {
        let text = format!("**{}**\nbody", inner);
        let blocks = ReportStructurer::new(&theme).structure_text(&text);
        assert!(
            matches!(&blocks[0], Block::SectionHeading(h) if h.text == inner),
            "heading for {:?} was {:?}",
            inner,
            blocks[0]
        );
    }
}

#[test]
fn test_bullet_with_one_emphasis_pair_has_three_spans() {
    let theme = theme();
    let blocks =
        ReportStructurer::new(&theme).structure_text("**Highlights**\n* Keynote by **Dr. Rao** on AI");

    let Block::BulletItem(item) = &blocks[1] else {
        panic!("expected bullet, got {:?}", blocks[1]);
    };
    assert_eq!(
        item.spans,
        vec![
            Span::plain("Keynote by "),
            Span::strong("Dr. Rao"),
            Span::plain(" on AI"),
        ]
    );
}

#[test]
fn test_participants_appended_in_order() {
    let theme = theme();
    let details = EventDetails {
        participants: Some("Alice, Bob ,Carol".to_string()),
        ..Default::default()
    };

    let blocks = ReportStructurer::new(&theme).structure(&details, "**1. Intro**\nText", &[]);
    let bullets: Vec<String> = blocks
        .iter()
        .filter(|b| b.kind() == "bullet")
        .map(Block::text)
        .collect();
    assert_eq!(bullets, vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn test_missing_photo_skipped_and_numbering_sequential() {
    let theme = theme();
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.png");
    let third = dir.path().join("third.png");
    write_png(&first);
    write_png(&third);
    let photos = vec![first.clone(), dir.path().join("missing.png"), third.clone()];

    let blocks =
        ReportStructurer::new(&theme).structure(&EventDetails::default(), "", &photos);

    let photo_blocks: Vec<(PathBuf, Option<String>)> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Photo(p) => Some((p.path.clone(), p.caption.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        photo_blocks,
        vec![
            (first, Some("Figure 1: Event Photo".to_string())),
            (third, Some("Figure 2: Event Photo".to_string())),
        ]
    );
    assert!(blocks.iter().any(|b| b.text() == "Event Photographs"));
}

#[test]
fn test_photo_heading_emitted_even_if_all_missing() {
    let theme = theme();
    let blocks = ReportStructurer::new(&theme).structure(
        &EventDetails::default(),
        "",
        &[PathBuf::from("/nonexistent/a.png")],
    );
    let kinds: Vec<&str> = blocks.iter().map(Block::kind).collect();
    assert_eq!(kinds, vec!["title", "subtitle", "section", "footer"]);
}

#[test]
fn test_banner_precedes_title() {
    let theme = theme();
    let dir = tempfile::tempdir().unwrap();
    let banner = dir.path().join("banner.png");
    write_png(&banner);

    let blocks = ReportStructurer::new(&theme)
        .with_banner(&banner)
        .structure(&EventDetails::default(), "", &[]);

    let Block::Photo(photo) = &blocks[0] else {
        panic!("expected banner, got {:?}", blocks[0]);
    };
    assert_eq!(photo.path, banner);
    assert_eq!(photo.caption, None);
    assert_eq!(photo.width_inches, 6.5);
    assert_eq!(blocks[1].kind(), "title");
}

#[test]
fn test_fallback_report_structures_into_nine_sections() {
    let theme = theme();
    let details = EventDetails {
        event_title: Some("AI Workshop".to_string()),
        ..Default::default()
    };

    let blocks = ReportStructurer::new(&theme).structure_text(&fallback_report(&details));
    let sections: Vec<String> = blocks
        .iter()
        .filter(|b| b.kind() == "section")
        .map(Block::text)
        .collect();
    assert_eq!(sections.len(), 9);
    assert_eq!(sections[0], "1. Event Title");
    assert_eq!(sections[8], "9. Conclusion");

    // "**Date:** Date" lines become emphasis-led bullets
    let date_line = blocks
        .iter()
        .find_map(|b| match b {
            Block::BulletItem(item) if item.text().starts_with("Date:") => Some(item),
            _ => None,
        })
        .unwrap();
    assert_eq!(date_line.spans[1], Span::strong("Date:"));
}

#[test]
fn test_theme_sizes_applied() {
    let registry = ThemeRegistry::builtin();
    let navy = registry.get("Elegant Navy").unwrap();
    let blocks = ReportStructurer::new(navy).structure_text("**Head**\nBody line");

    assert_eq!(blocks[0].style().size_pt, 14);
    assert_eq!(blocks[1].style().size_pt, 12);
    assert_eq!(blocks[1].style().font, "Times New Roman");
}
