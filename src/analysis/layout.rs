//! Layout and typography planning.

use crate::model::{
    ArrangementHint, Columns, ContentType, Emphasis, FontSizes, LayoutPattern, LayoutPlan,
    PlanSource, TitlePosition,
};

/// Title position and column defaults of a pattern.
pub fn pattern_defaults(pattern: LayoutPattern) -> (TitlePosition, Columns) {
    match pattern {
        LayoutPattern::Centered => (TitlePosition::Center, Columns::Fixed(1)),
        LayoutPattern::Split => (TitlePosition::Top, Columns::Fixed(2)),
        LayoutPattern::HorizontalFlow => (TitlePosition::Top, Columns::Auto),
        LayoutPattern::SideBySide => (TitlePosition::Top, Columns::Fixed(2)),
        LayoutPattern::HorizontalTimeline => (TitlePosition::Top, Columns::Auto),
        LayoutPattern::TitleBody => (TitlePosition::Top, Columns::Fixed(1)),
        LayoutPattern::TwoColumnContent => (TitlePosition::Top, Columns::Fixed(2)),
    }
}

/// Plan the layout of a slide.
///
/// `element_count` is the number of body-typed TextItems. Content types
/// without their own row use the `standard_content` row.
pub fn plan_layout(
    content_type: ContentType,
    element_count: usize,
    fonts: FontSizes,
) -> LayoutPlan {
    let (pattern, arrangement, emphasis) = match content_type {
        ContentType::TitleSlide => (
            LayoutPattern::Centered,
            Some(ArrangementHint::VerticalCenter),
            None,
        ),
        ContentType::DataPresentation => {
            (LayoutPattern::Split, Some(ArrangementHint::ChartRight), None)
        }
        ContentType::Process => (
            LayoutPattern::HorizontalFlow,
            Some(ArrangementHint::Connected),
            None,
        ),
        ContentType::Comparison => (
            LayoutPattern::SideBySide,
            Some(ArrangementHint::VisualSeparator),
            None,
        ),
        ContentType::Timeline => (
            LayoutPattern::HorizontalTimeline,
            Some(ArrangementHint::LeftToRight),
            None,
        ),
        ContentType::Closing => (LayoutPattern::Centered, None, Some(Emphasis::High)),
        ContentType::DetailedContent => (
            LayoutPattern::TwoColumnContent,
            Some(ArrangementHint::SplitBullets),
            None,
        ),
        ContentType::StandardContent
        | ContentType::Qa
        | ContentType::ImageFocused
        | ContentType::Empty => {
            let arrangement = if element_count > 2 {
                ArrangementHint::Bullets
            } else {
                ArrangementHint::Paragraphs
            };
            (LayoutPattern::TitleBody, Some(arrangement), None)
        }
    };

    let (title_position, columns) = pattern_defaults(pattern);
    LayoutPlan {
        pattern,
        title_position,
        columns,
        arrangement,
        emphasis,
        fonts,
        source: PlanSource::Planner,
    }
}

/// Font sizes for a slide's total TextItem character count.
///
/// Slide width and height are accepted for signature compatibility and do not
/// influence the result.
pub fn font_sizes(total_chars: usize, _width: f64, _height: f64) -> FontSizes {
    match total_chars {
        0..=99 => FontSizes::new(44, 24, 20, 14),
        100..=299 => FontSizes::new(40, 22, 18, 12),
        300..=499 => FontSizes::new(36, 20, 16, 11),
        _ => FontSizes::new(32, 18, 14, 10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONTS: FontSizes = FontSizes::new(44, 24, 20, 14);

    #[test]
    fn test_layout_table() {
        let plan = plan_layout(ContentType::TitleSlide, 0, FONTS);
        assert_eq!(plan.pattern, LayoutPattern::Centered);
        assert_eq!(plan.title_position, TitlePosition::Center);
        assert_eq!(plan.columns, Columns::Fixed(1));
        assert_eq!(plan.arrangement, Some(ArrangementHint::VerticalCenter));

        let plan = plan_layout(ContentType::DataPresentation, 3, FONTS);
        assert_eq!(plan.pattern, LayoutPattern::Split);
        assert_eq!(plan.columns, Columns::Fixed(2));
        assert_eq!(plan.arrangement, Some(ArrangementHint::ChartRight));

        let plan = plan_layout(ContentType::Process, 4, FONTS);
        assert_eq!(plan.columns, Columns::Auto);
        assert_eq!(plan.arrangement, Some(ArrangementHint::Connected));

        let plan = plan_layout(ContentType::Timeline, 4, FONTS);
        assert_eq!(plan.pattern, LayoutPattern::HorizontalTimeline);
        assert_eq!(plan.columns, Columns::Auto);

        let plan = plan_layout(ContentType::Closing, 0, FONTS);
        assert_eq!(plan.pattern, LayoutPattern::Centered);
        assert_eq!(plan.emphasis, Some(Emphasis::High));
        assert_eq!(plan.arrangement, None);

        let plan = plan_layout(ContentType::DetailedContent, 6, FONTS);
        assert_eq!(plan.pattern, LayoutPattern::TwoColumnContent);
        assert_eq!(plan.arrangement, Some(ArrangementHint::SplitBullets));
        assert_eq!(plan.source, PlanSource::Planner);
    }

    #[test]
    fn test_standard_content_arrangement() {
        let plan = plan_layout(ContentType::StandardContent, 3, FONTS);
        assert_eq!(plan.arrangement, Some(ArrangementHint::Bullets));
        let plan = plan_layout(ContentType::StandardContent, 2, FONTS);
        assert_eq!(plan.arrangement, Some(ArrangementHint::Paragraphs));

        // Types without a row fall back to standard content
        let plan = plan_layout(ContentType::Qa, 1, FONTS);
        assert_eq!(plan.pattern, LayoutPattern::TitleBody);
        assert_eq!(plan.columns, Columns::Fixed(1));
    }

    #[test]
    fn test_font_bands() {
        assert_eq!(font_sizes(0, 960.0, 540.0), FontSizes::new(44, 24, 20, 14));
        assert_eq!(font_sizes(99, 960.0, 540.0), FontSizes::new(44, 24, 20, 14));
        assert_eq!(font_sizes(100, 960.0, 540.0), FontSizes::new(40, 22, 18, 12));
        assert_eq!(font_sizes(450, 960.0, 540.0), FontSizes::new(36, 20, 16, 11));
        assert_eq!(font_sizes(500, 960.0, 540.0), FontSizes::new(32, 18, 14, 10));
    }

    #[test]
    fn test_font_sizes_ignore_canvas() {
        assert_eq!(font_sizes(450, 1.0, 1.0), font_sizes(450, 4000.0, 3000.0));
    }

    #[test]
    fn test_font_monotonicity() {
        let mut prev = font_sizes(0, 0.0, 0.0);
        for n in (0..2000).step_by(7) {
            let cur = font_sizes(n, 0.0, 0.0);
            assert!(cur.title <= prev.title);
            assert!(cur.subtitle <= prev.subtitle);
            assert!(cur.body <= prev.body);
            assert!(cur.caption <= prev.caption);
            prev = cur;
        }
    }
}
