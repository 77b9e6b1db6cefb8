//! Deck-level model structures.

use super::Slide;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default slide width in EMUs (10 inches).
pub const DEFAULT_SLIDE_CX: i64 = 9_144_000;
/// Default slide height in EMUs (7.5 inches).
pub const DEFAULT_SLIDE_CY: i64 = 6_858_000;
/// EMUs per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Document metadata extracted from docProps/core.xml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Deck title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Deck author/creator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Deck subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Creation date (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Last modification date (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Aspect ratio class of the slide canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Widescreen
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    /// Standard
    #[serde(rename = "4:3")]
    Standard,
}

impl AspectRatio {
    /// Classify a slide size in EMUs.
    ///
    /// Anything within 0.1 of 16/9 is widescreen; everything else is standard.
    pub fn classify(cx: i64, cy: i64) -> Self {
        if cy <= 0 {
            return AspectRatio::Standard;
        }
        let ratio = cx as f64 / cy as f64;
        if (ratio - 16.0 / 9.0).abs() < 0.1 {
            AspectRatio::Widescreen
        } else {
            AspectRatio::Standard
        }
    }

    /// Display form ("16:9" or "4:3").
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Standard => "4:3",
        }
    }
}

/// Color roles of a theme's `a:clrScheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeRole {
    Dark1,
    Light1,
    Dark2,
    Light2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
}

impl ThemeRole {
    /// All roles in scheme order.
    pub const ALL: [ThemeRole; 12] = [
        ThemeRole::Dark1,
        ThemeRole::Light1,
        ThemeRole::Dark2,
        ThemeRole::Light2,
        ThemeRole::Accent1,
        ThemeRole::Accent2,
        ThemeRole::Accent3,
        ThemeRole::Accent4,
        ThemeRole::Accent5,
        ThemeRole::Accent6,
        ThemeRole::Hyperlink,
        ThemeRole::FollowedHyperlink,
    ];

    /// Map an OOXML scheme element name (`dk1`, `accent3`, `folHlink`...).
    pub fn from_element(name: &str) -> Option<Self> {
        Some(match name {
            "dk1" => ThemeRole::Dark1,
            "lt1" => ThemeRole::Light1,
            "dk2" => ThemeRole::Dark2,
            "lt2" => ThemeRole::Light2,
            "accent1" => ThemeRole::Accent1,
            "accent2" => ThemeRole::Accent2,
            "accent3" => ThemeRole::Accent3,
            "accent4" => ThemeRole::Accent4,
            "accent5" => ThemeRole::Accent5,
            "accent6" => ThemeRole::Accent6,
            "hlink" => ThemeRole::Hyperlink,
            "folHlink" => ThemeRole::FollowedHyperlink,
            _ => return None,
        })
    }
}

/// Theme color palette, role to `#RRGGBB`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeColors {
    colors: BTreeMap<ThemeRole, String>,
}

impl ThemeColors {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a role's color.
    pub fn set(&mut self, role: ThemeRole, hex: impl Into<String>) {
        self.colors.insert(role, hex.into());
    }

    /// Get a role's color.
    pub fn get(&self, role: ThemeRole) -> Option<&str> {
        self.colors.get(&role).map(String::as_str)
    }

    /// Iterate over the defined roles in scheme order.
    pub fn iter(&self) -> impl Iterator<Item = (ThemeRole, &str)> {
        self.colors.iter().map(|(r, c)| (*r, c.as_str()))
    }

    /// Number of defined roles.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when no role is defined.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// An embedded media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    /// Base64-encoded bytes
    pub data: String,
    /// MIME type
    pub mime_type: String,
    /// Size in bytes before encoding
    pub size: u64,
}

impl MediaAsset {
    /// MIME type from a media filename.
    pub fn mime_from_filename(filename: &str) -> &'static str {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}

/// A parsed slide deck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    /// Slide width in 96-DPI pixels
    pub width_px: u32,

    /// Slide height in 96-DPI pixels
    pub height_px: u32,

    /// Aspect ratio class
    pub aspect_ratio: AspectRatio,

    /// Slides in presentation order
    #[serde(default)]
    pub slides: Vec<Slide>,

    /// Theme palette of the first theme part
    #[serde(default)]
    pub theme: ThemeColors,

    /// Media files keyed by filename
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub media: HashMap<String, MediaAsset>,

    /// Core document metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Deck {
    /// Build the canvas fields from a slide size in EMUs.
    pub fn with_size(cx: i64, cy: i64) -> Self {
        Self {
            width_px: emu_to_px(cx),
            height_px: emu_to_px(cy),
            aspect_ratio: AspectRatio::classify(cx, cy),
            ..Default::default()
        }
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Title of the first slide that has one, else the metadata title.
    pub fn title(&self) -> Option<String> {
        self.slides
            .iter()
            .find_map(|s| s.title())
            .or_else(|| self.metadata.title.clone())
    }
}

/// Convert EMUs to 96-DPI pixels.
pub fn emu_to_px(emu: i64) -> u32 {
    (emu.max(0) as f64 / EMU_PER_INCH * 96.0).round() as u32
}

/// Convert EMUs to inches.
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMU_PER_INCH
}
