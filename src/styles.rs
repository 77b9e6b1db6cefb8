//! Built-in style presets.
//!
//! Presets are read-only data. Every color is a solid `#rrggbb` value so both
//! writers can use it directly.

use crate::error::{Error, Result};
use crate::model::Alignment;
use serde::Serialize;

/// Theme colors of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleTheme {
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub primary_dark: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub accent: &'static str,
    pub border: &'static str,
}

/// Typography of a preset. Sizes are CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Typography {
    pub heading_font: &'static str,
    pub body_font: &'static str,
    pub heading_weight: u16,
    pub title_size: u32,
    pub heading_size: u32,
    pub body_size: u32,
}

/// Layout defaults of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutDefaults {
    pub content_alignment: Alignment,
    /// Where the accent decoration goes (`left-bar`, `top-bar`, `none`...)
    pub accent_position: &'static str,
}

/// Effect flags of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Effects {
    pub shadows: bool,
    pub rounded_corners: bool,
    pub gradients: bool,
}

/// A named visual style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StylePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub theme: StyleTheme,
    pub typography: Typography,
    pub layout: LayoutDefaults,
    pub effects: Effects,
}

impl StylePreset {
    /// Heading weight counts as bold from 600 up.
    pub fn bold_headings(&self) -> bool {
        self.typography.heading_weight >= 600
    }
}

/// Id of the preset used when none is selected.
pub const DEFAULT_STYLE: &str = "executive_minimal";

static STYLES: &[StylePreset] = &[
    StylePreset {
        id: "executive_minimal",
        name: "Executive Minimal",
        description: "Clean, sophisticated design for C-suite presentations",
        category: "Corporate",
        theme: StyleTheme {
            primary: "#0077b6",
            primary_light: "#0096c7",
            primary_dark: "#005f8d",
            secondary: "#f5f5f5",
            background: "#ffffff",
            surface: "#fafafa",
            text: "#1a1a2e",
            text_muted: "#6b7280",
            accent: "#00b4d8",
            border: "#e5e7eb",
        },
        typography: Typography {
            heading_font: "Arial",
            body_font: "Arial",
            heading_weight: 600,
            title_size: 42,
            heading_size: 28,
            body_size: 16,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "left-bar",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: false,
        },
    },
    StylePreset {
        id: "corporate_blue",
        name: "Corporate Blue",
        description: "Professional blue theme for business presentations",
        category: "Corporate",
        theme: StyleTheme {
            primary: "#1e3a5f",
            primary_light: "#2c5282",
            primary_dark: "#1a365d",
            secondary: "#f7fafc",
            background: "#ffffff",
            surface: "#edf2f7",
            text: "#2d3748",
            text_muted: "#718096",
            accent: "#3498db",
            border: "#e2e8f0",
        },
        typography: Typography {
            heading_font: "Arial",
            body_font: "Arial",
            heading_weight: 700,
            title_size: 40,
            heading_size: 26,
            body_size: 15,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "top-bar",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: true,
        },
    },
    StylePreset {
        id: "dark_executive",
        name: "Dark Executive",
        description: "Sophisticated dark theme for impactful presentations",
        category: "Corporate",
        theme: StyleTheme {
            primary: "#ffd700",
            primary_light: "#ffe34d",
            primary_dark: "#ccac00",
            secondary: "#1a1a1a",
            background: "#0f0f0f",
            surface: "#1f1f1f",
            text: "#ffffff",
            text_muted: "#a0a0a0",
            accent: "#ffd700",
            border: "#333333",
        },
        typography: Typography {
            heading_font: "Georgia",
            body_font: "Arial",
            heading_weight: 600,
            title_size: 44,
            heading_size: 30,
            body_size: 16,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Center,
            accent_position: "bottom-line",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: true,
        },
    },
    StylePreset {
        id: "modern_gradient",
        name: "Modern Gradient",
        description: "Vibrant violet tones with modern aesthetics",
        category: "Modern",
        // Gradient start color, with translucent layers blended onto it
        theme: StyleTheme {
            primary: "#667eea",
            primary_light: "#818cf8",
            primary_dark: "#4f46e5",
            secondary: "#764ba2",
            background: "#667eea",
            surface: "#7d91ed",
            text: "#ffffff",
            text_muted: "#e0e5fb",
            accent: "#f093fb",
            border: "#94a5f0",
        },
        typography: Typography {
            heading_font: "Arial",
            body_font: "Arial",
            heading_weight: 700,
            title_size: 48,
            heading_size: 32,
            body_size: 18,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "none",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: true,
        },
    },
    StylePreset {
        id: "neon_dark",
        name: "Neon Dark",
        description: "Bold neon accents on dark background for tech presentations",
        category: "Modern",
        theme: StyleTheme {
            primary: "#00ff88",
            primary_light: "#4fffaa",
            primary_dark: "#00cc6a",
            secondary: "#ff00ff",
            background: "#0a0a0a",
            surface: "#151515",
            text: "#ffffff",
            text_muted: "#888888",
            accent: "#00d4ff",
            border: "#333333",
        },
        typography: Typography {
            heading_font: "Impact",
            body_font: "Arial",
            heading_weight: 700,
            title_size: 52,
            heading_size: 34,
            body_size: 16,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "glow-border",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: true,
        },
    },
    StylePreset {
        id: "glassmorphism",
        name: "Glassmorphism",
        description: "Frosted panels with depth on a deep navy background",
        category: "Modern",
        // Middle gradient stop, with translucent layers blended onto it
        theme: StyleTheme {
            primary: "#a78bfa",
            primary_light: "#c4b5fd",
            primary_dark: "#8b5cf6",
            secondary: "#2d3751",
            background: "#16213e",
            surface: "#29334d",
            text: "#ffffff",
            text_muted: "#b9bcc5",
            accent: "#f472b6",
            border: "#454d65",
        },
        typography: Typography {
            heading_font: "Arial",
            body_font: "Arial",
            heading_weight: 600,
            title_size: 46,
            heading_size: 30,
            body_size: 17,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Center,
            accent_position: "glass-cards",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: true,
            gradients: true,
        },
    },
    StylePreset {
        id: "startup_fresh",
        name: "Startup Fresh",
        description: "Energetic and fresh design for startup pitches",
        category: "Startup",
        theme: StyleTheme {
            primary: "#ff6b6b",
            primary_light: "#ff8585",
            primary_dark: "#ee5a5a",
            secondary: "#4ecdc4",
            background: "#ffffff",
            surface: "#f8f9fa",
            text: "#2d3436",
            text_muted: "#636e72",
            accent: "#4ecdc4",
            border: "#dfe6e9",
        },
        typography: Typography {
            heading_font: "Impact",
            body_font: "Arial",
            heading_weight: 800,
            title_size: 50,
            heading_size: 32,
            body_size: 17,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "corner-shapes",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: true,
            gradients: false,
        },
    },
    StylePreset {
        id: "tech_minimal",
        name: "Tech Minimal",
        description: "Clean tech aesthetic with monospace elements",
        category: "Startup",
        theme: StyleTheme {
            primary: "#171717",
            primary_light: "#404040",
            primary_dark: "#0a0a0a",
            secondary: "#f5f5f5",
            background: "#fafafa",
            surface: "#ffffff",
            text: "#171717",
            text_muted: "#737373",
            accent: "#6366f1",
            border: "#e5e5e5",
        },
        typography: Typography {
            heading_font: "Arial",
            body_font: "Arial",
            heading_weight: 600,
            title_size: 44,
            heading_size: 28,
            body_size: 15,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "underline",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: false,
        },
    },
    StylePreset {
        id: "bold_creative",
        name: "Bold Creative",
        description: "Striking bold design for creative agencies",
        category: "Creative",
        theme: StyleTheme {
            primary: "#ff4757",
            primary_light: "#ff6b7a",
            primary_dark: "#e63946",
            secondary: "#ffa502",
            background: "#2f3542",
            surface: "#3d4555",
            text: "#ffffff",
            text_muted: "#a4b0be",
            accent: "#ffa502",
            border: "#57606f",
        },
        typography: Typography {
            heading_font: "Impact",
            body_font: "Arial",
            heading_weight: 900,
            title_size: 56,
            heading_size: 36,
            body_size: 18,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "diagonal",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: false,
        },
    },
    StylePreset {
        id: "pastel_dream",
        name: "Pastel Dream",
        description: "Soft pastel colors for gentle, approachable presentations",
        category: "Creative",
        theme: StyleTheme {
            primary: "#b8c1ec",
            primary_light: "#c8cef5",
            primary_dark: "#9fa8da",
            secondary: "#f7d6e0",
            background: "#ffeef8",
            surface: "#ffffff",
            text: "#5c5470",
            text_muted: "#8a819e",
            accent: "#f2b5d4",
            border: "#e6dff0",
        },
        typography: Typography {
            heading_font: "Georgia",
            body_font: "Arial",
            heading_weight: 600,
            title_size: 42,
            heading_size: 28,
            body_size: 16,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Center,
            accent_position: "rounded-shapes",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: true,
            gradients: true,
        },
    },
    StylePreset {
        id: "retro_vintage",
        name: "Retro Vintage",
        description: "Nostalgic retro design with warm tones",
        category: "Creative",
        theme: StyleTheme {
            primary: "#5a3921",
            primary_light: "#7a5235",
            primary_dark: "#3d2515",
            secondary: "#d4a373",
            background: "#f4e4ba",
            surface: "#faf6eb",
            text: "#3d2515",
            text_muted: "#6b5344",
            accent: "#bc6c25",
            border: "#d4a373",
        },
        typography: Typography {
            heading_font: "Georgia",
            body_font: "Times New Roman",
            heading_weight: 700,
            title_size: 48,
            heading_size: 32,
            body_size: 18,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Center,
            accent_position: "ornamental",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: false,
        },
    },
    StylePreset {
        id: "academic_classic",
        name: "Academic Classic",
        description: "Traditional academic style for educational content",
        category: "Educational",
        theme: StyleTheme {
            primary: "#1a237e",
            primary_light: "#3949ab",
            primary_dark: "#0d1642",
            secondary: "#f5f5f5",
            background: "#ffffff",
            surface: "#fafafa",
            text: "#212121",
            text_muted: "#757575",
            accent: "#c62828",
            border: "#e0e0e0",
        },
        typography: Typography {
            heading_font: "Georgia",
            body_font: "Times New Roman",
            heading_weight: 700,
            title_size: 40,
            heading_size: 28,
            body_size: 16,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "header-line",
        },
        effects: Effects {
            shadows: false,
            rounded_corners: false,
            gradients: false,
        },
    },
    StylePreset {
        id: "science_modern",
        name: "Science Modern",
        description: "Contemporary scientific presentation style",
        category: "Educational",
        theme: StyleTheme {
            primary: "#0d47a1",
            primary_light: "#1565c0",
            primary_dark: "#0a3d8a",
            secondary: "#e3f2fd",
            background: "#f0f4f8",
            surface: "#ffffff",
            text: "#1a237e",
            text_muted: "#5c6bc0",
            accent: "#00bfa5",
            border: "#bbdefb",
        },
        typography: Typography {
            heading_font: "Arial",
            body_font: "Arial",
            heading_weight: 600,
            title_size: 42,
            heading_size: 26,
            body_size: 15,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "data-highlight",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: false,
        },
    },
    StylePreset {
        id: "healthcare_clean",
        name: "Healthcare Clean",
        description: "Professional healthcare and medical presentations",
        category: "Industry",
        theme: StyleTheme {
            primary: "#00796b",
            primary_light: "#26a69a",
            primary_dark: "#004d40",
            secondary: "#e0f2f1",
            background: "#ffffff",
            surface: "#f5fffe",
            text: "#004d40",
            text_muted: "#4db6ac",
            accent: "#00bcd4",
            border: "#b2dfdb",
        },
        typography: Typography {
            heading_font: "Arial",
            body_font: "Arial",
            heading_weight: 600,
            title_size: 40,
            heading_size: 26,
            body_size: 15,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "side-accent",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: true,
            gradients: false,
        },
    },
    StylePreset {
        id: "finance_professional",
        name: "Finance Professional",
        description: "Serious financial and banking presentations",
        category: "Industry",
        theme: StyleTheme {
            primary: "#1b2838",
            primary_light: "#2c3e50",
            primary_dark: "#0f1923",
            secondary: "#ecf0f1",
            background: "#ffffff",
            surface: "#f8f9fa",
            text: "#1b2838",
            text_muted: "#7f8c8d",
            accent: "#27ae60",
            border: "#bdc3c7",
        },
        typography: Typography {
            heading_font: "Georgia",
            body_font: "Arial",
            heading_weight: 600,
            title_size: 42,
            heading_size: 28,
            body_size: 15,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "bottom-bar",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: false,
        },
    },
    StylePreset {
        id: "real_estate_luxury",
        name: "Real Estate Luxury",
        description: "Premium real estate and property presentations",
        category: "Industry",
        theme: StyleTheme {
            primary: "#d4af37",
            primary_light: "#e5c76b",
            primary_dark: "#b8952f",
            secondary: "#2c2c2c",
            background: "#1a1a1a",
            surface: "#252525",
            text: "#ffffff",
            text_muted: "#b0b0b0",
            accent: "#d4af37",
            border: "#404040",
        },
        typography: Typography {
            heading_font: "Georgia",
            body_font: "Arial",
            heading_weight: 400,
            title_size: 48,
            heading_size: 32,
            body_size: 17,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Center,
            accent_position: "gold-line",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: true,
        },
    },
    StylePreset {
        id: "eco_green",
        name: "Eco Green",
        description: "Sustainable and environmental themed presentations",
        category: "Nature",
        theme: StyleTheme {
            primary: "#2e7d32",
            primary_light: "#4caf50",
            primary_dark: "#1b5e20",
            secondary: "#dcedc8",
            background: "#f1f8e9",
            surface: "#ffffff",
            text: "#1b5e20",
            text_muted: "#558b2f",
            accent: "#81c784",
            border: "#c5e1a5",
        },
        typography: Typography {
            heading_font: "Georgia",
            body_font: "Arial",
            heading_weight: 600,
            title_size: 44,
            heading_size: 30,
            body_size: 16,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "leaf-accent",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: true,
            gradients: true,
        },
    },
    StylePreset {
        id: "ocean_calm",
        name: "Ocean Calm",
        description: "Serene ocean-inspired blue theme",
        category: "Nature",
        theme: StyleTheme {
            primary: "#006064",
            primary_light: "#0097a7",
            primary_dark: "#004d40",
            secondary: "#b2ebf2",
            background: "#e0f7fa",
            surface: "#ffffff",
            text: "#006064",
            text_muted: "#00838f",
            accent: "#4dd0e1",
            border: "#80deea",
        },
        typography: Typography {
            heading_font: "Georgia",
            body_font: "Arial",
            heading_weight: 500,
            title_size: 44,
            heading_size: 28,
            body_size: 16,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Center,
            accent_position: "wave",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: true,
            gradients: true,
        },
    },
    StylePreset {
        id: "pure_white",
        name: "Pure White",
        description: "Ultra-minimal white design with maximum impact",
        category: "Minimalist",
        theme: StyleTheme {
            primary: "#000000",
            primary_light: "#333333",
            primary_dark: "#000000",
            secondary: "#f5f5f5",
            background: "#ffffff",
            surface: "#fafafa",
            text: "#000000",
            text_muted: "#666666",
            accent: "#000000",
            border: "#eeeeee",
        },
        typography: Typography {
            heading_font: "Arial",
            body_font: "Arial",
            heading_weight: 300,
            title_size: 56,
            heading_size: 36,
            body_size: 18,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "none",
        },
        effects: Effects {
            shadows: false,
            rounded_corners: false,
            gradients: false,
        },
    },
    StylePreset {
        id: "monochrome_elegant",
        name: "Monochrome Elegant",
        description: "Sophisticated black and white with gray accents",
        category: "Minimalist",
        theme: StyleTheme {
            primary: "#1a1a1a",
            primary_light: "#404040",
            primary_dark: "#000000",
            secondary: "#f8f8f8",
            background: "#ffffff",
            surface: "#f8f8f8",
            text: "#1a1a1a",
            text_muted: "#888888",
            accent: "#555555",
            border: "#e0e0e0",
        },
        typography: Typography {
            heading_font: "Georgia",
            body_font: "Arial",
            heading_weight: 400,
            title_size: 48,
            heading_size: 32,
            body_size: 17,
        },
        layout: LayoutDefaults {
            content_alignment: Alignment::Left,
            accent_position: "thin-line",
        },
        effects: Effects {
            shadows: true,
            rounded_corners: false,
            gradients: false,
        },
    },
];

/// All presets in display order.
pub fn all_styles() -> &'static [StylePreset] {
    STYLES
}

/// Look up a preset by id.
pub fn get_style(id: &str) -> Result<&'static StylePreset> {
    STYLES
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| Error::UnknownStyle(id.to_string()))
}

/// Presets of one category.
pub fn styles_by_category(category: &str) -> Vec<&'static StylePreset> {
    STYLES.iter().filter(|s| s.category == category).collect()
}

/// Distinct categories in first-seen order.
pub fn categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for style in STYLES {
        if !seen.contains(&style.category) {
            seen.push(style.category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parse_hex;

    #[test]
    fn test_get_style() {
        let style = get_style("dark_executive").unwrap();
        assert_eq!(style.theme.background, "#0f0f0f");
        assert_eq!(style.typography.heading_font, "Georgia");
        assert!(get_style(DEFAULT_STYLE).is_ok());

        let err = get_style("comic_sans").unwrap_err();
        assert!(matches!(err, Error::UnknownStyle(_)));
    }

    #[test]
    fn test_all_colors_are_solid_hex() {
        for style in all_styles() {
            let t = &style.theme;
            for color in [
                t.primary,
                t.primary_light,
                t.primary_dark,
                t.secondary,
                t.background,
                t.surface,
                t.text,
                t.text_muted,
                t.accent,
                t.border,
            ] {
                assert!(parse_hex(color).is_some(), "{}: {}", style.id, color);
            }
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = all_styles().iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all_styles().len());
    }

    #[test]
    fn test_categories() {
        let cats = categories();
        assert_eq!(cats.first(), Some(&"Corporate"));
        assert!(cats.contains(&"Minimalist"));
        assert_eq!(styles_by_category("Corporate").len(), 3);
    }

    #[test]
    fn test_gradient_styles_use_solid_colors() {
        assert_eq!(all_styles().len(), 20);

        let modern = get_style("modern_gradient").unwrap();
        assert_eq!(modern.theme.background, "#667eea");
        assert!(modern.effects.gradients);

        let glass = get_style("glassmorphism").unwrap();
        assert_eq!(glass.theme.background, "#16213e");
        assert_eq!(glass.layout.content_alignment, Alignment::Center);

        let modern_ids: Vec<_> = styles_by_category("Modern").iter().map(|s| s.id).collect();
        assert!(modern_ids.contains(&"modern_gradient"));
        assert!(modern_ids.contains(&"glassmorphism"));
    }
}
