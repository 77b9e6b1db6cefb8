//! Slide, shape and text item structures.

use super::ContentType;
use serde::{Deserialize, Serialize};

/// Placeholder role of a shape (`p:ph@type`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderRole {
    /// `title`
    Title,
    /// `ctrTitle`
    CenterTitle,
    /// `subTitle`
    Subtitle,
    /// `body`, or a placeholder without a type
    Body,
    /// Any other placeholder kind (footer, date, slide number...), raw type kept
    Other(String),
}

impl PlaceholderRole {
    /// Map a `p:ph@type` value. `None` (no type attribute) means body.
    pub fn from_ph_type(ph_type: Option<&str>) -> Self {
        match ph_type {
            None | Some("body") => PlaceholderRole::Body,
            Some("title") => PlaceholderRole::Title,
            Some("ctrTitle") => PlaceholderRole::CenterTitle,
            Some("subTitle") => PlaceholderRole::Subtitle,
            Some(other) => PlaceholderRole::Other(other.to_string()),
        }
    }

    /// Title-like roles keep their whole text in one TextItem.
    pub fn is_title_like(&self) -> bool {
        matches!(
            self,
            PlaceholderRole::Title | PlaceholderRole::CenterTitle | PlaceholderRole::Subtitle
        )
    }

    /// Short label used in reports.
    pub fn label(&self) -> &str {
        match self {
            PlaceholderRole::Title => "title",
            PlaceholderRole::CenterTitle => "center_title",
            PlaceholderRole::Subtitle => "subtitle",
            PlaceholderRole::Body => "body",
            PlaceholderRole::Other(raw) => raw,
        }
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Map `a:pPr@algn`. Anything unrecognized is left.
    pub fn from_algn(value: &str) -> Self {
        match value {
            "ctr" => Alignment::Center,
            "r" => Alignment::Right,
            _ => Alignment::Left,
        }
    }
}

/// Formatting snapshot taken from the first run of the first paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Formatting {
    #[serde(default)]
    pub bold: bool,

    #[serde(default)]
    pub italic: bool,

    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,

    /// `#RRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default)]
    pub alignment: Alignment,

    /// Latin typeface
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

/// Position and size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A text-bearing shape (`p:sp`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Authoring name (`p:cNvPr@name`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Placeholder role, `None` for a generic shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<PlaceholderRole>,

    /// Paragraph texts in order, empty ones included
    #[serde(default)]
    pub paragraphs: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    #[serde(default)]
    pub formatting: Formatting,
}

impl Shape {
    /// Paragraphs joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// True when at least one paragraph has content.
    pub fn has_text(&self) -> bool {
        self.paragraphs.iter().any(|p| !p.is_empty())
    }

    /// Role used for derived TextItems.
    pub fn semantic_role(&self) -> PlaceholderRole {
        self.role.clone().unwrap_or(PlaceholderRole::Body)
    }
}

/// A semantic unit of slide text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    /// Role of the owning shape, body when it has none
    pub kind: PlaceholderRole,

    pub text: String,

    #[serde(default)]
    pub formatting: Formatting,
}

impl TextItem {
    /// True for body-typed items.
    pub fn is_body(&self) -> bool {
        self.kind == PlaceholderRole::Body
    }

    /// Character count (Unicode scalar values).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// A picture (`p:pic`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Relationship id of `a:blip@r:embed`
    pub rel_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Media filename the relationship resolves to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

/// A single slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based, contiguous
    pub slide_number: usize,

    /// Archive part the slide came from
    #[serde(default)]
    pub part_name: String,

    #[serde(default)]
    pub shapes: Vec<Shape>,

    #[serde(default)]
    pub text_items: Vec<TextItem>,

    #[serde(default)]
    pub images: Vec<ImageRef>,

    #[serde(default)]
    pub has_chart: bool,

    #[serde(default)]
    pub has_table: bool,

    /// Content-type label, unset until classified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<ContentType>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new(slide_number: usize, part_name: impl Into<String>) -> Self {
        Self {
            slide_number,
            part_name: part_name.into(),
            ..Default::default()
        }
    }

    /// First title or center-title text.
    pub fn title(&self) -> Option<String> {
        self.text_items
            .iter()
            .find(|t| {
                matches!(
                    t.kind,
                    PlaceholderRole::Title | PlaceholderRole::CenterTitle
                )
            })
            .map(|t| t.text.clone())
    }

    /// First subtitle text.
    pub fn subtitle(&self) -> Option<String> {
        self.text_items
            .iter()
            .find(|t| t.kind == PlaceholderRole::Subtitle)
            .map(|t| t.text.clone())
    }

    /// Body-typed items in order.
    pub fn body_items(&self) -> impl Iterator<Item = &TextItem> {
        self.text_items.iter().filter(|t| t.is_body())
    }

    /// Number of body-typed items.
    pub fn body_count(&self) -> usize {
        self.body_items().count()
    }

    /// Total characters over all TextItems.
    pub fn total_chars(&self) -> usize {
        self.text_items.iter().map(TextItem::char_count).sum()
    }

    /// Whether the slide has any picture.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// Digit-only strings of up to three characters are slide-number artifacts.
pub fn is_slide_number_artifact(text: &str) -> bool {
    let len = text.chars().count();
    len > 0 && len <= 3 && text.chars().all(|c| c.is_ascii_digit())
}
