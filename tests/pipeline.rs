//! End-to-end tests over synthetic decks.

mod common;

use common::{DeckBuilder, SlideXml};
use redeck::advisor::{AdvisorError, AdvisorOptions, AdvisorRequest, DesignAdvisor};
use redeck::model::{Columns, ContentType, Emphasis, FontSizes, LayoutPattern, ThemeRole};
use redeck::pipeline::{Pipeline, Service};
use redeck::render::{
    export, export_with, ExportFormat, ExportOptions, RenderRecord, RenderStyle, Scene,
    SlideRenderer,
};
use redeck::session::{SessionStatus, SessionStore};
use redeck::styles::{get_style, StylePreset};
use redeck::{DeckReader, Error, ReaderOptions};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn read(data: Vec<u8>) -> redeck::Deck {
    DeckReader::from_bytes(data, ReaderOptions::default())
        .unwrap()
        .read()
        .unwrap()
}

/// Title slide, chart slide with three points, five-point closing slide.
fn scenario_deck() -> Vec<u8> {
    DeckBuilder::new()
        .title("Kickoff")
        .with_theme()
        .slide(SlideXml::new().center_title("Welcome"))
        .slide(
            SlideXml::new()
                .body(&["Revenue up 12%", "Costs down 4%", "Margin flat"])
                .chart(),
        )
        .slide(SlideXml::new().body(&[
            "Reach our team",
            "Email sales@example.com",
            "Call the office",
            "Visit the website",
            "Use the contact form",
        ]))
        .build()
}

fn review_deck() -> Vec<u8> {
    DeckBuilder::new()
        .title("Quarterly Review")
        .slide(
            SlideXml::new()
                .center_title("Quarterly Review")
                .subtitle("Q3 2024"),
        )
        .slide(
            SlideXml::new()
                .title("Revenue")
                .body(&["Up 12% year over year"])
                .chart(),
        )
        .slide(SlideXml::new().title("Thank you").body(&["Contact us"]))
        .build()
}

fn one_slide_deck() -> Vec<u8> {
    DeckBuilder::new()
        .slide(SlideXml::new().title("Summary").body(&["Done"]))
        .build()
}

#[test]
fn test_slide_order_follows_part_index() {
    let data = DeckBuilder::new()
        .slide_at(3, SlideXml::new().title("Three"))
        .slide_at(1, SlideXml::new().title("One"))
        .slide_at(2, SlideXml::new().title("Two"))
        .build();
    let deck = read(data);

    let titles: Vec<String> = deck.slides.iter().filter_map(|s| s.title()).collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);
    let numbers: Vec<usize> = deck.slides.iter().map(|s| s.slide_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_blank_paragraph_splits_body() {
    let data = DeckBuilder::new()
        .slide(SlideXml::new().body(&["First point", "", "Second point"]))
        .build();
    let deck = read(data);

    let body: Vec<&str> = deck.slides[0]
        .body_items()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(body, vec!["First point", "Second point"]);
}

#[test]
fn test_classification_is_deterministic() {
    let mut first = read(scenario_deck());
    let mut second = read(scenario_deck());
    assert_eq!(redeck::analyze(&mut first), redeck::analyze(&mut second));
}

#[test]
fn test_chart_outranks_process_keywords() {
    let data = DeckBuilder::new()
        .slide(
            SlideXml::new()
                .title("Our process")
                .body(&["Step one", "Step two"])
                .chart(),
        )
        .build();
    let mut deck = read(data);
    let analyses = redeck::analyze(&mut deck);
    assert_eq!(analyses[0].content_type, ContentType::DataPresentation);
}

#[test]
fn test_three_slide_scenario() {
    let mut deck = read(scenario_deck());
    assert_eq!(deck.slides[1].body_count(), 3);
    assert_eq!(deck.slides[2].body_count(), 5);

    let analyses = redeck::analyze(&mut deck);
    assert_eq!(analyses.len(), 3);

    assert_eq!(analyses[0].content_type, ContentType::TitleSlide);
    assert_eq!(analyses[0].layout.pattern, LayoutPattern::Centered);
    assert_eq!(analyses[0].layout.columns, Columns::Fixed(1));

    assert_eq!(analyses[1].content_type, ContentType::DataPresentation);
    assert_eq!(analyses[1].layout.pattern, LayoutPattern::Split);
    assert_eq!(analyses[1].layout.columns, Columns::Fixed(2));

    // Closing keywords are checked before the item count
    assert_eq!(analyses[2].content_type, ContentType::Closing);
    assert_eq!(analyses[2].layout.pattern, LayoutPattern::Centered);
    assert_eq!(analyses[2].layout.emphasis, Some(Emphasis::High));

    // Labels are recorded on the slides themselves
    assert_eq!(deck.slides[2].layout_type, Some(ContentType::Closing));
    assert_eq!(deck.metadata.title.as_deref(), Some("Kickoff"));
    assert_eq!(deck.theme.get(ThemeRole::Accent1), Some("#4472C4"));
    assert_eq!((deck.width_px, deck.height_px), (1280, 720));
}

#[test]
fn test_450_characters_use_third_font_band() {
    let text = "a".repeat(450);
    let data = DeckBuilder::new()
        .slide(SlideXml::new().body(&[text.as_str()]))
        .build();
    let mut deck = read(data);
    let analyses = redeck::analyze(&mut deck);

    assert_eq!(analyses[0].total_chars, 450);
    assert_eq!(analyses[0].layout.fonts, FontSizes::new(36, 20, 16, 11));
}

#[test]
fn test_malformed_archives() {
    let result = DeckReader::from_bytes(b"PK\x03\x04 truncated".to_vec(), ReaderOptions::default());
    assert!(matches!(result, Err(Error::MalformedDocument(_))));

    // A valid zip without the presentation part
    let mut buffer = Vec::new();
    {
        use std::io::Write;
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buffer));
        zip.start_file("hello.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"hi").unwrap();
        zip.finish().unwrap();
    }
    let result = DeckReader::from_bytes(buffer, ReaderOptions::default());
    assert!(matches!(result, Err(Error::MalformedDocument(_))));
}

#[test]
fn test_media_ceiling() {
    let data = DeckBuilder::new()
        .slide(SlideXml::new().title("Pictures").picture("rId2"))
        .media("small.png", vec![1u8; 100])
        .media("huge.png", vec![1u8; 4096])
        .build();
    let options = ReaderOptions::default().with_max_media_bytes(1024);
    let deck = DeckReader::from_bytes(data, options).unwrap().read().unwrap();

    assert!(deck.media.contains_key("small.png"));
    assert!(!deck.media.contains_key("huge.png"));
    assert!(deck.slides[0].has_images());
}

struct Failing;

impl SlideRenderer for Failing {
    fn render(&self, record: &RenderRecord, _style: &StylePreset) -> redeck::Result<Scene> {
        Err(Error::Render(format!("slide {} refused", record.slide_number)))
    }
}

#[test]
fn test_failing_renderer_still_writes_every_slide() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new();
    let mut deck = pipeline.parse_bytes(review_deck()).unwrap();
    let analyses = pipeline.analyze(&mut deck);
    let style = get_style("executive_minimal").unwrap();
    let records = pipeline.redesign(&deck, &analyses, style);

    let output = dir.path().join("out.pptx");
    export_with(&Failing, &records, style, &ExportOptions::new(), &output).unwrap();

    let written = read(std::fs::read(&output).unwrap());
    assert_eq!(written.slide_count(), 3);
    let titles: Vec<String> = written
        .slides
        .iter()
        .flat_map(|s| s.text_items.iter().map(|t| t.text.clone()))
        .collect();
    assert_eq!(titles, vec!["Quarterly Review", "Revenue", "Thank you"]);
}

#[test]
fn test_zero_slides_export_one_placeholder() {
    let dir = TempDir::new().unwrap();
    let style = get_style("executive_minimal").unwrap();

    let output = dir.path().join("empty.pptx");
    export(&[], style, &ExportOptions::new(), &output).unwrap();
    assert_eq!(read(std::fs::read(&output).unwrap()).slide_count(), 1);

    let html = dir.path().join("html");
    let options = ExportOptions::new().with_format(ExportFormat::Html);
    export(&[], style, &options, &html).unwrap();
    assert!(html.join("slide1.html").exists());
    assert!(!html.join("slide2.html").exists());
}

struct Stuck;

impl DesignAdvisor for Stuck {
    fn name(&self) -> &str {
        "stuck"
    }

    fn advise(&self, _request: &AdvisorRequest) -> Result<String, AdvisorError> {
        std::thread::sleep(Duration::from_secs(5));
        Ok(r#"{"slides": [{"slide_number": 1, "layout": "grid"}]}"#.to_string())
    }
}

struct Garbage;

impl DesignAdvisor for Garbage {
    fn name(&self) -> &str {
        "garbage"
    }

    fn advise(&self, _request: &AdvisorRequest) -> Result<String, AdvisorError> {
        Ok("I would suggest a bolder title.".to_string())
    }
}

#[test]
fn test_unavailable_advisor_matches_planner() {
    let style = get_style("corporate_blue").unwrap();
    let plain = Pipeline::new();
    let mut deck = plain.parse_bytes(review_deck()).unwrap();
    let analyses = plain.analyze(&mut deck);
    let expected = plain.redesign(&deck, &analyses, style);

    let stuck = Pipeline::new()
        .with_advisor(Arc::new(Stuck))
        .with_advisor_options(AdvisorOptions::default().with_timeout(Duration::from_millis(50)));
    assert_eq!(stuck.redesign(&deck, &analyses, style), expected);

    let garbage = Pipeline::new().with_advisor(Arc::new(Garbage));
    assert_eq!(garbage.redesign(&deck, &analyses, style), expected);
}

#[test]
fn test_service_end_to_end_cards_html() {
    let dir = TempDir::new().unwrap();
    let service = Service::new(SessionStore::new(dir.path()));
    let id = service.create_session().unwrap();

    service.upload(&id, "quarterly.pptx", &review_deck()).unwrap();
    assert_eq!(service.parse(&id).unwrap(), 3);
    service.analyze(&id).unwrap();
    let records = service.redesign(&id, "corporate_blue").unwrap();
    assert_eq!(records[1].content_type, ContentType::DataPresentation);

    let options = ExportOptions::new()
        .with_format(ExportFormat::Html)
        .with_render_style(RenderStyle::Cards);
    let output = service.export(&id, &options).unwrap();
    assert_eq!(service.download(&id).unwrap(), output);
    assert_eq!(service.status(&id).unwrap(), SessionStatus::Exported);

    let first = std::fs::read_to_string(output.join("slide1.html")).unwrap();
    assert!(first.contains("<title>Quarterly Review - Slide 1</title>"));
    assert!(first.contains("Q3 2024"));
    let last = std::fs::read_to_string(output.join("slide3.html")).unwrap();
    assert!(last.contains("Thank you"));

    assert!(service.delete(&id).unwrap());
    assert!(!output.exists());
}

#[test]
fn test_redesigned_pptx_round_trips() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new();
    let mut deck = pipeline.parse_bytes(review_deck()).unwrap();
    let analyses = pipeline.analyze(&mut deck);
    let style = get_style("executive_minimal").unwrap();
    let records = pipeline.redesign(&deck, &analyses, style);

    let output = dir.path().join("redesigned.pptx");
    export(&records, style, &ExportOptions::new(), &output).unwrap();

    let redesigned = pipeline.parse(&output).unwrap();
    assert_eq!(redesigned.slide_count(), 3);
    assert_eq!((redesigned.width_px, redesigned.height_px), (960, 540));
    let text: Vec<String> = redesigned.slides[1]
        .text_items
        .iter()
        .map(|t| t.text.clone())
        .collect();
    assert!(text.contains(&"Revenue".to_string()));
    assert!(text.contains(&"Up 12% year over year".to_string()));
}

#[test]
fn test_html_reexport_replaces_previous_slides() {
    let dir = TempDir::new().unwrap();
    let service = Service::new(SessionStore::new(dir.path()));
    let id = service.create_session().unwrap();
    let options = ExportOptions::new().with_format(ExportFormat::Html);

    service.upload(&id, "review.pptx", &review_deck()).unwrap();
    service.parse(&id).unwrap();
    service.analyze(&id).unwrap();
    service.redesign(&id, "corporate_blue").unwrap();
    let output = service.export(&id, &options).unwrap();
    assert_eq!(std::fs::read_dir(&output).unwrap().count(), 3);

    service.upload(&id, "summary.pptx", &one_slide_deck()).unwrap();
    assert_eq!(service.parse(&id).unwrap(), 1);
    service.analyze(&id).unwrap();
    service.redesign(&id, "corporate_blue").unwrap();
    let again = service.export(&id, &options).unwrap();
    assert_eq!(again, output);

    let names: Vec<String> = std::fs::read_dir(&again)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["slide1.html"]);
    let only = std::fs::read_to_string(again.join("slide1.html")).unwrap();
    assert!(only.contains("Summary"));
}
