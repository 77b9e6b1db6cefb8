//! Classification and layout plan structures.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Content-type label assigned to a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    TitleSlide,
    DataPresentation,
    Process,
    Comparison,
    Timeline,
    Qa,
    Closing,
    DetailedContent,
    StandardContent,
    ImageFocused,
    Empty,
}

impl ContentType {
    /// Label as used in reports and the advisor request.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TitleSlide => "title_slide",
            ContentType::DataPresentation => "data_presentation",
            ContentType::Process => "process",
            ContentType::Comparison => "comparison",
            ContentType::Timeline => "timeline",
            ContentType::Qa => "qa",
            ContentType::Closing => "closing",
            ContentType::DetailedContent => "detailed_content",
            ContentType::StandardContent => "standard_content",
            ContentType::ImageFocused => "image_focused",
            ContentType::Empty => "empty",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout pattern of a planned slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPattern {
    Centered,
    Split,
    HorizontalFlow,
    SideBySide,
    HorizontalTimeline,
    TitleBody,
    TwoColumnContent,
}

impl LayoutPattern {
    /// Every known pattern.
    pub const ALL: [LayoutPattern; 7] = [
        LayoutPattern::Centered,
        LayoutPattern::Split,
        LayoutPattern::HorizontalFlow,
        LayoutPattern::SideBySide,
        LayoutPattern::HorizontalTimeline,
        LayoutPattern::TitleBody,
        LayoutPattern::TwoColumnContent,
    ];

    /// Pattern name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPattern::Centered => "centered",
            LayoutPattern::Split => "split",
            LayoutPattern::HorizontalFlow => "horizontal_flow",
            LayoutPattern::SideBySide => "side_by_side",
            LayoutPattern::HorizontalTimeline => "horizontal_timeline",
            LayoutPattern::TitleBody => "title_body",
            LayoutPattern::TwoColumnContent => "two_column_content",
        }
    }
}

impl FromStr for LayoutPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutPattern::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown layout pattern: {}", s))
    }
}

impl fmt::Display for LayoutPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the title sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePosition {
    Center,
    Top,
}

/// Column count of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    /// A fixed number of columns
    Fixed(u8),
    /// As many columns as the content needs
    Auto,
}

impl Columns {
    /// Resolve to a concrete count for `items` elements.
    pub fn resolve(&self, items: usize) -> usize {
        match self {
            Columns::Fixed(n) => usize::from(*n).max(1),
            Columns::Auto => items.clamp(1, 4),
        }
    }
}

impl Serialize for Columns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Columns::Fixed(n) => serializer.serialize_u8(*n),
            Columns::Auto => serializer.serialize_str("auto"),
        }
    }
}

impl<'de> Deserialize<'de> for Columns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(u8),
            Word(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Count(n) => Ok(Columns::Fixed(n)),
            Repr::Word(w) if w == "auto" => Ok(Columns::Auto),
            Repr::Word(w) => Err(serde::de::Error::custom(format!(
                "invalid column count: {}",
                w
            ))),
        }
    }
}

/// How the body content is arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrangementHint {
    VerticalCenter,
    ChartRight,
    Connected,
    VisualSeparator,
    LeftToRight,
    Bullets,
    Paragraphs,
    SplitBullets,
}

/// Visual emphasis level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    High,
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizes {
    pub title: u32,
    pub subtitle: u32,
    pub body: u32,
    pub caption: u32,
}

impl FontSizes {
    pub const fn new(title: u32, subtitle: u32, body: u32, caption: u32) -> Self {
        Self {
            title,
            subtitle,
            body,
            caption,
        }
    }
}

/// Who produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    #[default]
    Planner,
    Advisor,
}

/// Layout and typography plan for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub pattern: LayoutPattern,
    pub title_position: TitlePosition,
    pub columns: Columns,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<ArrangementHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
    pub fonts: FontSizes,
    #[serde(default)]
    pub source: PlanSource,
}

/// How the accent color is used on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccentUse {
    DecorativeShape,
    DataHighlight,
    CtaButton,
    Bullets,
    Emphasis,
}

/// Color assignment for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPlan {
    pub background: String,
    pub title_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_color: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub chart_colors: Vec<String>,
    /// Accent color used for the roles in `accent_uses`
    pub accent: String,
    #[serde(default)]
    pub accent_uses: Vec<AccentUse>,
}

/// Shape of an advisor-suggested decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
    Circle,
    Line,
    Bar,
}

impl FromStr for DecorationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(DecorationKind::Circle),
            "line" => Ok(DecorationKind::Line),
            "bar" => Ok(DecorationKind::Bar),
            other => Err(format!("unknown decoration kind: {}", other)),
        }
    }
}

/// A validated decoration from an accepted advisor directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub kind: DecorationKind,
    /// Free-form placement hint (`top-right`, `bottom`, `left`...)
    pub position: String,
    pub color: String,
}
