//! Rule-based content classification.

use crate::model::{ContentType, PlaceholderRole, Slide};

const PROCESS_WORDS: &[&str] = &["step", "process", "phase", "stage"];
const COMPARISON_WORDS: &[&str] = &["compare", "versus", "vs", "difference"];
const TIMELINE_WORDS: &[&str] = &["timeline", "history", "roadmap"];
const QA_WORDS: &[&str] = &["question", "?", "faq"];
const CLOSING_WORDS: &[&str] = &["thank", "contact", "questions?"];

/// Assign a content-type label to a slide.
///
/// Rules are tried in order and the first match wins. Keyword tests are plain
/// substring tests over the lower-cased, space-joined TextItem texts, so
/// "vs" also matches inside longer words.
pub fn classify(slide: &Slide) -> ContentType {
    if slide.text_items.is_empty() {
        return if slide.has_images() {
            ContentType::ImageFocused
        } else {
            ContentType::Empty
        };
    }

    if slide.text_items.len() <= 2
        && slide.text_items.iter().any(|t| {
            matches!(
                t.kind,
                PlaceholderRole::CenterTitle | PlaceholderRole::Subtitle
            )
        })
    {
        return ContentType::TitleSlide;
    }

    if slide.has_chart || slide.has_table {
        return ContentType::DataPresentation;
    }

    let all_text = slide
        .text_items
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| all_text.contains(w));

    if mentions(PROCESS_WORDS) {
        return ContentType::Process;
    }
    if mentions(COMPARISON_WORDS) {
        return ContentType::Comparison;
    }
    if mentions(TIMELINE_WORDS) {
        return ContentType::Timeline;
    }
    if mentions(QA_WORDS) {
        return ContentType::Qa;
    }
    if mentions(CLOSING_WORDS) {
        return ContentType::Closing;
    }

    if slide.body_count() > 4 {
        return ContentType::DetailedContent;
    }

    ContentType::StandardContent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Formatting, ImageRef, TextItem};

    fn item(kind: PlaceholderRole, text: &str) -> TextItem {
        TextItem {
            kind,
            text: text.to_string(),
            formatting: Formatting::default(),
        }
    }

    fn slide(items: Vec<TextItem>) -> Slide {
        let mut slide = Slide::new(1, "ppt/slides/slide1.xml");
        slide.text_items = items;
        slide
    }

    #[test]
    fn test_empty_and_image_focused() {
        let mut s = slide(vec![]);
        assert_eq!(classify(&s), ContentType::Empty);

        s.images.push(ImageRef {
            rel_id: "rId2".into(),
            position: None,
            media: None,
        });
        assert_eq!(classify(&s), ContentType::ImageFocused);
    }

    #[test]
    fn test_title_slide() {
        let s = slide(vec![
            item(PlaceholderRole::CenterTitle, "Annual Report"),
            item(PlaceholderRole::Subtitle, "2024"),
        ]);
        assert_eq!(classify(&s), ContentType::TitleSlide);

        // A plain title with one body line is not a title slide
        let s = slide(vec![
            item(PlaceholderRole::Title, "Agenda"),
            item(PlaceholderRole::Body, "Intro"),
        ]);
        assert_eq!(classify(&s), ContentType::StandardContent);
    }

    #[test]
    fn test_chart_beats_keywords() {
        let mut s = slide(vec![
            item(PlaceholderRole::Title, "Our process"),
            item(PlaceholderRole::Body, "Step one"),
        ]);
        s.has_chart = true;
        assert_eq!(classify(&s), ContentType::DataPresentation);

        s.has_chart = false;
        assert_eq!(classify(&s), ContentType::Process);
    }

    #[test]
    fn test_keyword_order() {
        let cases = [
            ("Product A versus B", ContentType::Comparison),
            ("Company history", ContentType::Timeline),
            ("Any question?", ContentType::Qa),
            ("Canvas vs. paper", ContentType::Comparison),
            ("Thank you", ContentType::Closing),
            ("Timeline of each stage", ContentType::Process),
        ];
        for (text, expected) in cases {
            let s = slide(vec![item(PlaceholderRole::Title, text)]);
            assert_eq!(classify(&s), expected, "{}", text);
        }
    }

    #[test]
    fn test_closing_precedes_detailed() {
        let mut items = vec![item(PlaceholderRole::Title, "Thank you")];
        for i in 0..6 {
            items.push(item(PlaceholderRole::Body, &format!("Contact line {}", i)));
        }
        assert_eq!(classify(&slide(items)), ContentType::Closing);
    }

    #[test]
    fn test_detailed_content() {
        let mut items = vec![item(PlaceholderRole::Title, "Overview")];
        for text in ["Alpha", "Bravo", "Charlie", "Delta", "Echo"] {
            items.push(item(PlaceholderRole::Body, text));
        }
        assert_eq!(classify(&slide(items.clone())), ContentType::DetailedContent);

        items.pop();
        assert_eq!(classify(&slide(items)), ContentType::StandardContent);
    }

    #[test]
    fn test_deterministic() {
        let s = slide(vec![
            item(PlaceholderRole::Title, "Roadmap"),
            item(PlaceholderRole::Body, "Q1 launch"),
        ]);
        let first = classify(&s);
        for _ in 0..10 {
            assert_eq!(classify(&s), first);
        }
    }
}
