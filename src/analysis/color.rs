//! Color planning with luminance-based contrast correction.

use crate::model::{AccentUse, ColorPlan, ContentType};
use crate::styles::StyleTheme;

/// Foreground used on dark backgrounds.
pub const LIGHT_TEXT: &str = "#ffffff";
/// Foreground used on light backgrounds.
pub const DARK_TEXT: &str = "#1a1a2e";

/// Parse `#rrggbb` (or `rrggbb`) into components.
pub fn parse_hex(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Perceived luminance in `0.0..=1.0`.
pub fn luminance((r, g, b): (u8, u8, u8)) -> f64 {
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
}

/// Whether a color reads as dark. Unparseable values count as light.
pub fn is_dark(value: &str) -> bool {
    parse_hex(value).is_some_and(|rgb| luminance(rgb) < 0.5)
}

/// Return `value` when it parses, else `fallback` (logged).
pub fn resolve_hex(value: &str, fallback: &str) -> String {
    if parse_hex(value).is_some() {
        value.to_string()
    } else {
        tracing::debug!("unparseable color {:?}, using {}", value, fallback);
        fallback.to_string()
    }
}

/// Keep `foreground` when it contrasts with `background`, else pick the
/// standard light or dark text color.
pub fn ensure_contrast(foreground: &str, background: &str) -> String {
    let bg_dark = is_dark(background);
    if parse_hex(foreground).is_some() && is_dark(foreground) != bg_dark {
        return foreground.to_string();
    }
    let replacement = if bg_dark { LIGHT_TEXT } else { DARK_TEXT };
    tracing::debug!(
        "foreground {} lacks contrast on {}, using {}",
        foreground,
        background,
        replacement
    );
    replacement.to_string()
}

/// Plan the colors of one slide from a style theme.
pub fn plan_colors(theme: &StyleTheme, content_type: ContentType) -> ColorPlan {
    let primary = resolve_hex(theme.primary, "#000000");
    let secondary = resolve_hex(theme.secondary, "#ffffff");
    let accent = resolve_hex(theme.accent, &primary);
    let background = resolve_hex(theme.background, "#ffffff");
    let text = resolve_hex(theme.text, "#000000");
    let text_muted = resolve_hex(theme.text_muted, "#cccccc");

    let mut plan = match content_type {
        ContentType::TitleSlide => ColorPlan {
            background: primary.clone(),
            title_color: LIGHT_TEXT.to_string(),
            subtitle_color: Some(text_muted),
            body_color: None,
            chart_colors: Vec::new(),
            accent,
            accent_uses: vec![AccentUse::DecorativeShape],
        },
        ContentType::DataPresentation => ColorPlan {
            background,
            title_color: text.clone(),
            subtitle_color: None,
            body_color: Some(text),
            chart_colors: vec![primary, accent.clone(), secondary],
            accent,
            accent_uses: vec![AccentUse::DataHighlight],
        },
        ContentType::Closing => ColorPlan {
            background: primary,
            title_color: LIGHT_TEXT.to_string(),
            subtitle_color: None,
            body_color: None,
            chart_colors: Vec::new(),
            accent,
            accent_uses: vec![AccentUse::CtaButton],
        },
        _ => ColorPlan {
            background,
            title_color: primary,
            subtitle_color: None,
            body_color: Some(text),
            chart_colors: Vec::new(),
            accent,
            accent_uses: vec![AccentUse::Bullets, AccentUse::Emphasis],
        },
    };

    plan.title_color = ensure_contrast(&plan.title_color, &plan.background);
    plan.subtitle_color = plan
        .subtitle_color
        .map(|c| ensure_contrast(&c, &plan.background));
    plan.body_color = plan.body_color.map(|c| ensure_contrast(&c, &plan.background));
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::get_style;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#0077b6"), Some((0x00, 0x77, 0xb6)));
        assert_eq!(parse_hex("FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gg0000"), None);
        assert_eq!(parse_hex("rgba(0,0,0,1)"), None);
    }

    #[test]
    fn test_is_dark() {
        assert!(is_dark("#000000"));
        assert!(is_dark("#0f0f0f"));
        assert!(!is_dark("#ffffff"));
        assert!(!is_dark("#ffd700"));
        assert!(!is_dark("not a color"));
    }

    #[test]
    fn test_ensure_contrast() {
        assert_eq!(ensure_contrast("#ffffff", "#000000"), "#ffffff");
        assert_eq!(ensure_contrast("#222222", "#000000"), LIGHT_TEXT);
        assert_eq!(ensure_contrast("#eeeeee", "#ffffff"), DARK_TEXT);
        assert_eq!(ensure_contrast("oops", "#ffffff"), DARK_TEXT);
    }

    #[test]
    fn test_title_slide_colors() {
        let style = get_style("executive_minimal").unwrap();
        let plan = plan_colors(&style.theme, ContentType::TitleSlide);
        assert_eq!(plan.background, "#0077b6");
        assert_eq!(plan.title_color, "#ffffff");
        // muted gray is too dark on the primary background
        assert_eq!(plan.subtitle_color.as_deref(), Some(LIGHT_TEXT));
        assert_eq!(plan.accent_uses, vec![AccentUse::DecorativeShape]);
    }

    #[test]
    fn test_dark_preset_closing() {
        // Gold primary is light, so white title is replaced by dark text
        let style = get_style("dark_executive").unwrap();
        let plan = plan_colors(&style.theme, ContentType::Closing);
        assert_eq!(plan.background, "#ffd700");
        assert_eq!(plan.title_color, DARK_TEXT);
        assert_eq!(plan.accent_uses, vec![AccentUse::CtaButton]);
    }

    #[test]
    fn test_data_and_standard_colors() {
        let style = get_style("corporate_blue").unwrap();
        let plan = plan_colors(&style.theme, ContentType::DataPresentation);
        assert_eq!(plan.background, "#ffffff");
        assert_eq!(plan.title_color, "#2d3748");
        assert_eq!(plan.chart_colors, vec!["#1e3a5f", "#3498db", "#f7fafc"]);

        let plan = plan_colors(&style.theme, ContentType::Timeline);
        assert_eq!(plan.title_color, "#1e3a5f");
        assert_eq!(plan.body_color.as_deref(), Some("#2d3748"));
        assert_eq!(
            plan.accent_uses,
            vec![AccentUse::Bullets, AccentUse::Emphasis]
        );
    }
}
