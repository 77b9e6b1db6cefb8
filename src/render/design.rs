//! The built-in scene composer.

use super::scene::{
    estimate_text_height, fit_size, Element, Frame, Scene, TextBox, CANVAS_HEIGHT, CANVAS_WIDTH,
};
use super::{RenderRecord, RenderStyle, SlideRenderer, Variant};
use crate::analysis::{ensure_contrast, parse_hex, resolve_hex, LIGHT_TEXT};
use crate::error::{Error, Result};
use crate::model::{
    AccentUse, Alignment, ArrangementHint, DecorationKind, LayoutPattern, TitlePosition,
};
use crate::styles::StylePreset;

const MARGIN: f64 = 0.6;
const CONTENT_WIDTH: f64 = CANVAS_WIDTH - 2.0 * MARGIN;
const TITLE_TOP: f64 = 0.4;
const TITLE_MAX_HEIGHT: f64 = 0.9;
const CONTENT_TOP: f64 = 1.4;
const CONTENT_BOTTOM: f64 = 5.2;
const GAP: f64 = 0.15;
const MIN_TITLE_PT: u32 = 20;
const MIN_BODY_PT: u32 = 9;

/// Edge length of an advisor decoration.
const DECORATION_SIZE: f64 = 2.25;
const GRID_COLUMNS: usize = 3;
/// Card accents after the first, which uses the theme accent.
const GRID_ACCENTS: [&str; 5] = ["#ff6b6b", "#ffd166", "#06d6a0", "#118ab2", "#073b4c"];
const DEFAULT_TAGLINE: &str = "Questions?";

/// Composes slides from their layout plan, in either render style.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesignRenderer {
    style: RenderStyle,
}

impl DesignRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }
}

impl SlideRenderer for DesignRenderer {
    fn render(&self, record: &RenderRecord, preset: &StylePreset) -> Result<Scene> {
        let palette = Palette::resolve(record, preset)?;
        let mut composer = Composer {
            record,
            preset,
            style: self.style,
            scene: Scene::new(record.slide_number, palette.background.clone()),
            palette,
        };

        let variant = Variant::select(record);
        tracing::debug!(
            slide = record.slide_number,
            variant = variant.as_str(),
            style = self.style.as_str(),
            "composing slide"
        );

        composer.decorations();
        match variant {
            Variant::Hero => composer.hero(),
            Variant::Closing => composer.closing(),
            Variant::Split => composer.split(),
            Variant::Cards => composer.cards(),
            Variant::Grid => composer.grid(),
            Variant::SectionBreak => composer.section_break(),
        }
        Ok(composer.scene)
    }
}

/// Final colors of a slide, contrast-checked against their backgrounds.
struct Palette {
    background: String,
    title: String,
    subtitle: String,
    body: String,
    accent: String,
    surface: String,
    on_surface: String,
    on_accent: String,
}

impl Palette {
    fn resolve(record: &RenderRecord, preset: &StylePreset) -> Result<Self> {
        let colors = &record.colors;
        if parse_hex(&colors.background).is_none() {
            return Err(Error::Render(format!(
                "slide {}: invalid background color {:?}",
                record.slide_number, colors.background
            )));
        }

        let background = colors.background.clone();
        let title = ensure_contrast(&colors.title_color, &background);
        let body = ensure_contrast(colors.body_color.as_deref().unwrap_or(&title), &background);
        let subtitle = ensure_contrast(
            colors.subtitle_color.as_deref().unwrap_or(&body),
            &background,
        );
        let accent = resolve_hex(&colors.accent, preset.theme.accent);
        let surface = resolve_hex(preset.theme.surface, &background);
        let on_surface = ensure_contrast(&body, &surface);
        let on_accent = ensure_contrast(LIGHT_TEXT, &accent);

        Ok(Self {
            background,
            title,
            subtitle,
            body,
            accent,
            surface,
            on_surface,
            on_accent,
        })
    }
}

fn lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

fn decoration_origin(position: &str) -> (f64, f64) {
    match position.to_ascii_lowercase().replace('_', "-").as_str() {
        "top-left" => (-0.75, -0.75),
        "bottom-right" => (7.5, 3.75),
        "bottom-left" => (-0.75, 3.75),
        "center-right" | "right" => (8.25, 1.875),
        "center-left" | "left" => (-0.75, 1.875),
        _ => (8.25, -0.75),
    }
}

struct Composer<'a> {
    record: &'a RenderRecord,
    preset: &'a StylePreset,
    style: RenderStyle,
    palette: Palette,
    scene: Scene,
}

impl Composer<'_> {
    fn push(&mut self, element: Element) {
        self.scene.push(element);
    }

    fn heading(&self, frame: Frame, paragraphs: Vec<String>, size: u32, color: &str) -> TextBox {
        TextBox::new(frame, paragraphs, size, color)
            .bold(self.preset.bold_headings())
            .font(self.preset.typography.heading_font)
    }

    fn body_text(&self, frame: Frame, paragraphs: Vec<String>, size: u32, color: &str) -> TextBox {
        TextBox::new(frame, paragraphs, size, color).font(self.preset.typography.body_font)
    }

    fn uses(&self, accent_use: AccentUse) -> bool {
        self.record.colors.accent_uses.contains(&accent_use)
    }

    fn min_body(&self) -> u32 {
        MIN_BODY_PT.min(self.record.layout.fonts.body)
    }

    /// Short accent rule: a line in classic style, a rounded pill in cards.
    fn rule(&mut self, x: f64, y: f64, width: f64) {
        let accent = self.palette.accent.clone();
        match self.style {
            RenderStyle::Classic => self.push(Element::line((x, y), (x + width, y), accent, 3.0)),
            RenderStyle::Cards => {
                self.push(Element::rounded(Frame::new(x, y - 0.03, width, 0.06), accent))
            }
        }
    }

    /// Full-width or full-height band along one edge.
    fn band(&mut self, edge: &str, thickness: f64, color: String) -> bool {
        let frame = match edge {
            "top" => Frame::new(0.0, 0.0, CANVAS_WIDTH, thickness),
            "bottom" => Frame::new(0.0, CANVAS_HEIGHT - thickness, CANVAS_WIDTH, thickness),
            "left" => Frame::new(0.0, 0.0, thickness, CANVAS_HEIGHT),
            "right" => Frame::new(CANVAS_WIDTH - thickness, 0.0, thickness, CANVAS_HEIGHT),
            _ => return false,
        };
        self.push(Element::rect(frame, color));
        true
    }

    fn decorations(&mut self) {
        let record = self.record;
        for decoration in &record.decorations {
            let color = resolve_hex(&decoration.color, &self.palette.accent);
            let edge = decoration.position.to_ascii_lowercase();
            let (x, y) = decoration_origin(&decoration.position);
            match decoration.kind {
                DecorationKind::Circle => self.push(Element::ellipse(
                    Frame::new(x, y, DECORATION_SIZE, DECORATION_SIZE),
                    color,
                )),
                DecorationKind::Line | DecorationKind::Bar => {
                    let thickness = if decoration.kind == DecorationKind::Bar {
                        0.12
                    } else {
                        0.06
                    };
                    if !self.band(&edge, thickness, color.clone()) {
                        let frame = Frame::new(
                            x.max(0.0),
                            (y + DECORATION_SIZE / 2.0).max(0.0),
                            DECORATION_SIZE,
                            thickness,
                        );
                        self.push(Element::rect(frame, color));
                    }
                }
            }
        }
    }

    /// Accent chrome of content slides, from the preset's accent position.
    fn chrome(&mut self) -> bool {
        let accent = self.palette.accent.clone();
        match self.style {
            RenderStyle::Cards => {
                self.push(Element::ellipse(Frame::new(9.25, 5.0, 1.2, 1.2), accent));
                false
            }
            RenderStyle::Classic => match self.preset.layout.accent_position {
                "left-bar" | "side-accent" => self.band("left", 0.12, accent),
                "top-bar" | "header-line" => self.band("top", 0.08, accent),
                "bottom-bar" => self.band("bottom", 0.1, accent),
                "none" => true,
                _ => false,
            },
        }
    }

    /// Title at the top of a content slide. Returns where content starts.
    fn top_title(&mut self) -> f64 {
        let underline = !self.chrome();
        let Some(title) = self.record.title() else {
            return TITLE_TOP + 0.4;
        };

        let paragraphs = lines(title);
        let size = fit_size(
            &paragraphs,
            self.record.layout.fonts.title,
            MIN_TITLE_PT,
            CONTENT_WIDTH,
            TITLE_MAX_HEIGHT,
        );
        let height = estimate_text_height(&paragraphs, size, CONTENT_WIDTH).min(TITLE_MAX_HEIGHT);
        let frame = Frame::new(MARGIN, TITLE_TOP, CONTENT_WIDTH, height);
        let alignment = self.preset.layout.content_alignment;
        let color = self.palette.title.clone();
        let title = self.heading(frame, paragraphs, size, &color).align(alignment);
        self.push(Element::Text(title));

        if underline && self.style == RenderStyle::Classic {
            let x = match alignment {
                Alignment::Left => MARGIN,
                Alignment::Center => (CANVAS_WIDTH - 1.2) / 2.0,
                Alignment::Right => CANVAS_WIDTH - MARGIN - 1.2,
            };
            self.rule(x, frame.bottom() + 0.1, 1.2);
        }
        (frame.bottom() + 0.25).max(CONTENT_TOP)
    }

    /// Large title block around the vertical center. Returns its frame.
    fn center_title(&mut self, bottom: f64) -> Frame {
        let paragraphs = lines(&self.record.display_title());
        let width = CANVAS_WIDTH - 1.0;
        let size = fit_size(
            &paragraphs,
            self.record.layout.fonts.title,
            MIN_TITLE_PT,
            width,
            1.8,
        );
        let height = estimate_text_height(&paragraphs, size, width).min(1.8);
        let (frame, alignment) = match self.record.layout.title_position {
            TitlePosition::Center => (
                Frame::new(0.5, bottom - height, width, height),
                Alignment::Center,
            ),
            TitlePosition::Top => (
                Frame::new(MARGIN, TITLE_TOP + 0.4, CONTENT_WIDTH, height),
                Alignment::Left,
            ),
        };
        let color = self.palette.title.clone();
        let title = self.heading(frame, paragraphs, size, &color).align(alignment);
        self.push(Element::Text(title));
        frame
    }

    fn centered(&self) -> bool {
        self.record.layout.title_position == TitlePosition::Center
    }

    fn hero(&mut self) {
        let accent = self.palette.accent.clone();
        match self.style {
            RenderStyle::Cards if self.uses(AccentUse::DecorativeShape) => {
                self.push(Element::ellipse(Frame::new(8.2, -1.0, 2.6, 2.6), accent.clone()));
                self.push(Element::ellipse(Frame::new(-0.8, 4.1, 2.0, 2.0), accent));
            }
            RenderStyle::Cards => {}
            RenderStyle::Classic => {
                self.band("bottom", 0.15, accent);
            }
        }

        let title = self.center_title(2.4);
        let rule_y = title.bottom() + 0.2;
        let rule_x = if self.centered() {
            (CANVAS_WIDTH - 1.5) / 2.0
        } else {
            title.x
        };
        self.rule(rule_x, rule_y, 1.5);

        let subtitle: Vec<String> = match self.record.subtitle() {
            Some(text) => lines(text),
            None => self
                .record
                .body()
                .into_iter()
                .take(2)
                .map(str::to_string)
                .collect(),
        };
        if subtitle.is_empty() {
            return;
        }

        let fonts = self.record.layout.fonts;
        let top = rule_y + 0.3;
        let available = CONTENT_BOTTOM - top;
        let size = fit_size(
            &subtitle,
            fonts.subtitle,
            fonts.caption.min(fonts.subtitle),
            title.width,
            available,
        );
        let height = estimate_text_height(&subtitle, size, title.width).min(available);
        let alignment = if self.centered() {
            Alignment::Center
        } else {
            Alignment::Left
        };
        let color = self.palette.subtitle.clone();
        let text = self
            .body_text(Frame::new(title.x, top, title.width, height), subtitle, size, &color)
            .align(alignment);
        self.push(Element::Text(text));
    }

    fn closing(&mut self) {
        let accent = self.palette.accent.clone();
        match self.style {
            RenderStyle::Cards => {
                self.push(Element::ellipse(Frame::new(-0.9, -0.9, 2.4, 2.4), accent.clone()));
                self.push(Element::ellipse(Frame::new(8.4, 4.0, 2.4, 2.4), accent));
            }
            RenderStyle::Classic => {
                self.band("top", 0.1, accent);
            }
        }

        let title = self.center_title(2.5);
        let fonts = self.record.layout.fonts;

        let record = self.record;
        let body = record.body();
        let (tagline, rest) = match (self.record.subtitle(), body.split_first()) {
            (Some(subtitle), _) => (subtitle.to_string(), body.as_slice()),
            (None, Some((first, rest))) => (first.to_string(), rest),
            (None, None) => (DEFAULT_TAGLINE.to_string(), &[][..]),
        };

        let tag_width = 4.5;
        let tag_x = if self.centered() {
            (CANVAS_WIDTH - tag_width) / 2.0
        } else {
            title.x
        };
        let tag_frame = Frame::new(tag_x, title.bottom() + 0.35, tag_width, 0.65);
        let tag_lines = lines(&tagline);
        let size = fit_size(
            &tag_lines,
            fonts.subtitle,
            fonts.caption.min(fonts.subtitle),
            tag_width - 0.3,
            tag_frame.height,
        );

        if self.style == RenderStyle::Cards && self.uses(AccentUse::CtaButton) {
            self.push(Element::rounded(tag_frame, self.palette.accent.clone()));
            let color = self.palette.on_accent.clone();
            let text = self
                .body_text(tag_frame.inset(0.08), tag_lines, size, &color)
                .bold(true)
                .align(Alignment::Center);
            self.push(Element::Text(text));
        } else {
            let color = self.palette.subtitle.clone();
            let text = self
                .body_text(tag_frame, tag_lines, size, &color)
                .align(Alignment::Center);
            self.push(Element::Text(text));
            self.rule((CANVAS_WIDTH - 1.75) / 2.0, tag_frame.bottom() + 0.15, 1.75);
        }

        let details: Vec<String> = rest.iter().take(3).map(|s| s.to_string()).collect();
        if !details.is_empty() {
            let color = self.palette.subtitle.clone();
            let frame = Frame::new(1.0, 4.4, CANVAS_WIDTH - 2.0, 0.8);
            let size = fit_size(
                &details,
                fonts.caption,
                MIN_BODY_PT.min(fonts.caption),
                frame.width,
                frame.height,
            );
            let text = self
                .body_text(frame, details, size, &color)
                .align(Alignment::Center);
            self.push(Element::Text(text));
        }
    }

    /// A column of body paragraphs filling `frame`.
    fn column(&mut self, frame: Frame, items: &[&str], bullets: bool, color: &str) {
        if items.is_empty() {
            return;
        }
        let paragraphs: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        let size = fit_size(
            &paragraphs,
            self.record.layout.fonts.body,
            self.min_body(),
            frame.width,
            frame.height,
        );
        let text = self.body_text(frame, paragraphs, size, color).bullets(bullets);
        self.push(Element::Text(text));
    }

    fn split(&mut self) {
        let top = self.top_title();
        let record = self.record;
        let body = record.body();
        let height = CONTENT_BOTTOM - top;
        let column_gap = 0.4;
        let column_width = (CONTENT_WIDTH - column_gap) / 2.0;
        let left = Frame::new(MARGIN, top, column_width, height);
        let right = Frame::new(MARGIN + column_width + column_gap, top, column_width, height);
        let bullets = self.record.layout.arrangement != Some(ArrangementHint::Paragraphs);

        if self.record.has_chart || self.record.has_table {
            let color = self.palette.body.clone();
            self.column(left, &body, bullets, &color);
            self.data_panel(right);
            return;
        }

        let mid = body.len().div_ceil(2);
        let (first, second) = body.split_at(mid);
        match self.style {
            RenderStyle::Cards => {
                let surface = self.palette.surface.clone();
                let color = self.palette.on_surface.clone();
                for (frame, items) in [(left, first), (right, second)] {
                    if items.is_empty() {
                        continue;
                    }
                    self.push(Element::rounded(frame, surface.clone()));
                    self.column(frame.inset(0.2), items, bullets, &color);
                }
            }
            RenderStyle::Classic => {
                let x = MARGIN + column_width + column_gap / 2.0;
                let accent = self.palette.accent.clone();
                if !second.is_empty() {
                    self.push(Element::line((x, top), (x, top + height), accent, 1.5));
                }
                let color = self.palette.body.clone();
                self.column(left, first, bullets, &color);
                self.column(right, second, bullets, &color);
            }
        }
    }

    /// Panel standing in for the slide's chart or table.
    fn data_panel(&mut self, frame: Frame) {
        let surface = self.palette.surface.clone();
        let highlight = self
            .record
            .colors
            .chart_colors
            .first()
            .map(|c| resolve_hex(c, &self.palette.accent))
            .unwrap_or_else(|| self.palette.accent.clone());

        match self.style {
            RenderStyle::Cards => self.push(Element::rounded(frame, surface)),
            RenderStyle::Classic => self.push(Element::rect(frame, surface)),
        }
        self.push(Element::rect(Frame::new(frame.x, frame.y, frame.width, 0.06), highlight));

        let label = if self.record.has_chart { "Chart" } else { "Table" };
        let color = self.palette.on_surface.clone();
        let caption = self.record.layout.fonts.caption;
        let text = self
            .body_text(
                Frame::new(frame.x, frame.y + frame.height / 2.0 - 0.2, frame.width, 0.4),
                vec![label.to_string()],
                caption,
                &color,
            )
            .align(Alignment::Center);
        self.push(Element::Text(text));
    }

    fn number(&self, frame: Frame, index: usize, color: &str) -> Element {
        let size = self.record.layout.fonts.caption;
        Element::Text(
            self.body_text(frame, vec![(index + 1).to_string()], size, color)
                .bold(true)
                .align(Alignment::Center),
        )
    }

    fn cards(&mut self) {
        let top = self.top_title();
        let record = self.record;
        let body = record.body();
        if body.is_empty() {
            return;
        }

        let n = body.len();
        let columns = self.record.layout.columns.resolve(n).clamp(1, n);
        let rows = n.div_ceil(columns);
        let available = CONTENT_BOTTOM - top;
        let width = (CONTENT_WIDTH - GAP * (columns - 1) as f64) / columns as f64;
        let height = (available - GAP * (rows - 1) as f64) / rows as f64;
        let height = if columns == 1 { height.min(0.75) } else { height.min(2.4) };

        let frames: Vec<Frame> = (0..n)
            .map(|i| {
                let (row, col) = (i / columns, i % columns);
                Frame::new(
                    MARGIN + col as f64 * (width + GAP),
                    top + row as f64 * (height + GAP),
                    width,
                    height,
                )
            })
            .collect();

        if columns == 1 {
            for (i, (frame, text)) in frames.iter().zip(&body).enumerate() {
                self.list_card(*frame, i, text);
            }
            return;
        }

        let accent = self.palette.accent.clone();
        if self.record.layout.pattern == LayoutPattern::HorizontalTimeline {
            let offset = match self.style {
                RenderStyle::Cards => 0.425,
                RenderStyle::Classic => 0.03,
            };
            for row in 0..rows {
                let y = top + row as f64 * (height + GAP) + offset;
                self.push(Element::line(
                    (MARGIN, y),
                    (MARGIN + CONTENT_WIDTH, y),
                    accent.clone(),
                    1.5,
                ));
            }
        }

        for (i, (frame, text)) in frames.iter().zip(&body).enumerate() {
            self.flow_card(*frame, i, text);
        }

        let connected = self.record.layout.pattern == LayoutPattern::HorizontalFlow
            || self.record.layout.arrangement == Some(ArrangementHint::Connected);
        if connected {
            for pair in frames.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if (a.y - b.y).abs() > f64::EPSILON {
                    continue;
                }
                let y = a.y + a.height / 2.0;
                self.push(Element::line((a.right(), y), (b.x, y), accent.clone(), 2.0));
            }
        }
    }

    fn list_card(&mut self, frame: Frame, index: usize, text: &str) {
        let paragraphs = vec![text.to_string()];
        let area = match self.style {
            RenderStyle::Cards => {
                let accent = self.palette.accent.clone();
                self.push(Element::rounded(frame, self.palette.surface.clone()));
                self.push(Element::rect(
                    Frame::new(frame.x, frame.y, 0.075, frame.height),
                    accent.clone(),
                ));
                let d = 0.375_f64.min(frame.height - 0.1).max(0.1);
                let circle = Frame::new(frame.x + 0.2, frame.y + (frame.height - d) / 2.0, d, d);
                self.push(Element::ellipse(circle, accent));
                let number = self.number(circle, index, &self.palette.on_accent);
                self.push(number);
                Frame::new(frame.x + 0.75, frame.y + 0.05, frame.width - 0.9, frame.height - 0.1)
            }
            RenderStyle::Classic => {
                if self.record.layout.arrangement == Some(ArrangementHint::Paragraphs) {
                    frame
                } else {
                    self.push(Element::rect(
                        Frame::new(frame.x, frame.y + frame.height / 2.0 - 0.05, 0.1, 0.1),
                        self.palette.accent.clone(),
                    ));
                    Frame::new(frame.x + 0.3, frame.y, frame.width - 0.3, frame.height)
                }
            }
        };

        let color = match self.style {
            RenderStyle::Cards => self.palette.on_surface.clone(),
            RenderStyle::Classic => self.palette.body.clone(),
        };
        let size = fit_size(
            &paragraphs,
            self.record.layout.fonts.body,
            self.min_body(),
            area.width,
            area.height,
        );
        let text = self.body_text(area, paragraphs, size, &color);
        self.push(Element::Text(text));
    }

    fn flow_card(&mut self, frame: Frame, index: usize, text: &str) {
        let accent = self.palette.accent.clone();
        let (area, color) = match self.style {
            RenderStyle::Cards => {
                self.push(Element::rounded(frame, self.palette.surface.clone()));
                let circle = Frame::new(frame.x + 0.2, frame.y + 0.2, 0.45, 0.45);
                self.push(Element::ellipse(circle, accent));
                let number = self.number(circle, index, &self.palette.on_accent);
                self.push(number);
                (
                    Frame::new(
                        frame.x + 0.2,
                        frame.y + 0.8,
                        frame.width - 0.4,
                        (frame.height - 1.0).max(0.3),
                    ),
                    self.palette.on_surface.clone(),
                )
            }
            RenderStyle::Classic => {
                self.push(Element::rect(
                    Frame::new(frame.x, frame.y, frame.width, 0.06),
                    accent.clone(),
                ));
                let number_color = ensure_contrast(&accent, &self.palette.background);
                let number = self.number(
                    Frame::new(frame.x, frame.y + 0.15, 0.5, 0.45),
                    index,
                    &number_color,
                );
                self.push(number);
                (
                    Frame::new(
                        frame.x,
                        frame.y + 0.7,
                        frame.width,
                        (frame.height - 0.7).max(0.3),
                    ),
                    self.palette.body.clone(),
                )
            }
        };

        let paragraphs = vec![text.to_string()];
        let size = fit_size(
            &paragraphs,
            self.record.layout.fonts.body,
            self.min_body(),
            area.width,
            area.height,
        );
        let text = self.body_text(area, paragraphs, size, &color);
        self.push(Element::Text(text));
    }

    fn grid(&mut self) {
        let top = self.top_title();
        let record = self.record;
        let body = record.body();
        if body.is_empty() {
            return;
        }

        let n = body.len();
        let columns = GRID_COLUMNS.min(n);
        let rows = n.div_ceil(columns);
        let gap = 0.25;
        let width = (CONTENT_WIDTH - gap * (columns - 1) as f64) / columns as f64;
        let height = (CONTENT_BOTTOM - top - gap * (rows - 1) as f64) / rows as f64;
        let compact = height < 1.4;

        for (i, text) in body.iter().enumerate() {
            let (row, col) = (i / columns, i % columns);
            let frame = Frame::new(
                MARGIN + col as f64 * (width + gap),
                top + row as f64 * (height + gap),
                width,
                height,
            );
            let strip = match i % (GRID_ACCENTS.len() + 1) {
                0 => self.palette.accent.clone(),
                k => GRID_ACCENTS[k - 1].to_string(),
            };

            let surface = self.palette.surface.clone();
            match self.style {
                RenderStyle::Cards => self.push(Element::rounded(frame, surface.clone())),
                RenderStyle::Classic => self.push(Element::rect(frame, surface.clone())),
            }
            self.push(Element::rect(
                Frame::new(frame.x, frame.y, frame.width, 0.08),
                strip.clone(),
            ));

            let badge = if compact {
                Frame::new(frame.x + 0.15, frame.y + 0.2, 0.4, 0.4)
            } else {
                Frame::new(frame.x + 0.2, frame.y + 0.25, 0.4, 0.4)
            };
            let number_color = match self.style {
                RenderStyle::Cards => {
                    self.push(Element::ellipse(badge, strip.clone()));
                    ensure_contrast(LIGHT_TEXT, &strip)
                }
                RenderStyle::Classic => ensure_contrast(&strip, &surface),
            };
            let number = self.number(badge, i, &number_color);
            self.push(number);

            let area = if compact {
                Frame::new(
                    frame.x + 0.7,
                    frame.y + 0.15,
                    frame.width - 0.85,
                    (frame.height - 0.25).max(0.2),
                )
            } else {
                Frame::new(
                    frame.x + 0.2,
                    frame.y + 0.75,
                    frame.width - 0.4,
                    (frame.height - 0.9).max(0.2),
                )
            };
            let paragraphs = vec![text.to_string()];
            let size = fit_size(
                &paragraphs,
                self.record.layout.fonts.body,
                self.min_body(),
                area.width,
                area.height,
            );
            let color = self.palette.on_surface.clone();
            let text = self.body_text(area, paragraphs, size, &color);
            self.push(Element::Text(text));
        }
    }

    fn section_break(&mut self) {
        let accent = self.palette.accent.clone();
        let fonts = self.record.layout.fonts;
        let paragraphs = lines(&self.record.display_title());

        let (frame, alignment) = match self.style {
            RenderStyle::Classic => {
                let x = MARGIN + 0.35;
                let width = CONTENT_WIDTH - 0.35;
                let size = fit_size(&paragraphs, fonts.title, MIN_TITLE_PT, width, 1.6);
                let height = estimate_text_height(&paragraphs, size, width).min(1.6);
                let frame = Frame::new(x, 2.6 - height / 2.0, width, height);
                self.push(Element::rect(
                    Frame::new(MARGIN, frame.y, 0.1, frame.height),
                    accent,
                ));
                let title = self
                    .heading(frame, paragraphs, size, &self.palette.title)
                    .align(Alignment::Left);
                self.push(Element::Text(title));
                (frame, Alignment::Left)
            }
            RenderStyle::Cards => {
                self.push(Element::ellipse(Frame::new(-1.2, -1.2, 3.4, 3.4), accent.clone()));
                self.push(Element::ellipse(Frame::new(8.6, 4.2, 2.2, 2.2), accent));
                let width = CANVAS_WIDTH - 1.0;
                let size = fit_size(&paragraphs, fonts.title, MIN_TITLE_PT, width, 1.6);
                let height = estimate_text_height(&paragraphs, size, width).min(1.6);
                let frame = Frame::new(0.5, 2.6 - height / 2.0, width, height);
                let title = self
                    .heading(frame, paragraphs, size, &self.palette.title)
                    .align(Alignment::Center);
                self.push(Element::Text(title));
                (frame, Alignment::Center)
            }
        };

        if let Some(subtitle) = self.record.subtitle() {
            let paragraphs = lines(subtitle);
            let frame = Frame::new(frame.x, frame.bottom() + 0.2, frame.width, 0.6);
            let size = fit_size(
                &paragraphs,
                fonts.subtitle,
                fonts.caption.min(fonts.subtitle),
                frame.width,
                frame.height,
            );
            let text = self
                .body_text(frame, paragraphs, size, &self.palette.subtitle)
                .align(alignment);
            self.push(Element::Text(text));
        }
    }
}
