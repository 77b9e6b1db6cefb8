//! Slide content extraction.
//!
//! Walks one slide part's shape tree with a streaming reader and produces the
//! typed [`Slide`] record: shapes, derived text items, pictures and the
//! chart/table flags.

use crate::container::{attr, OoxmlContainer, Relationships};
use crate::error::{Error, Result};
use crate::model::{
    emu_to_inches, is_slide_number_artifact, Alignment, Formatting, ImageRef, PlaceholderRole,
    Position, Shape, Slide, TextItem,
};
use quick_xml::events::{BytesStart, Event};
use unicode_normalization::UnicodeNormalization;

/// Accumulates `a:off`/`a:ext` values of an `a:xfrm`.
#[derive(Debug, Default)]
struct XfrmBuilder {
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
    seen: bool,
}

impl XfrmBuilder {
    fn offset(&mut self, e: &BytesStart<'_>) {
        self.seen = true;
        self.x = emu_attr(e, b"x");
        self.y = emu_attr(e, b"y");
    }

    fn extent(&mut self, e: &BytesStart<'_>) {
        self.seen = true;
        self.cx = emu_attr(e, b"cx");
        self.cy = emu_attr(e, b"cy");
    }

    fn finish(&self) -> Option<Position> {
        self.seen.then(|| Position {
            x: emu_to_inches(self.x),
            y: emu_to_inches(self.y),
            width: emu_to_inches(self.cx),
            height: emu_to_inches(self.cy),
        })
    }
}

fn emu_attr(e: &BytesStart<'_>, name: &[u8]) -> i64 {
    attr(e, name).and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Shape under construction.
#[derive(Debug, Default)]
struct ShapeBuilder {
    name: Option<String>,
    role: Option<PlaceholderRole>,
    paragraphs: Vec<String>,
    xfrm: XfrmBuilder,
    formatting: Formatting,
    /// The first run of the first paragraph has been consumed
    first_run_done: bool,
}

impl ShapeBuilder {
    fn finish(self) -> Option<Shape> {
        let shape = Shape {
            name: self.name,
            role: self.role,
            paragraphs: self.paragraphs,
            position: self.xfrm.finish(),
            formatting: self.formatting,
        };
        if shape.has_text() || shape.role.is_some() {
            Some(shape)
        } else {
            None
        }
    }
}

/// Picture under construction.
#[derive(Debug, Default)]
struct PictureBuilder {
    rel_id: Option<String>,
    xfrm: XfrmBuilder,
}

/// Streaming extractor for one slide part.
struct SlideExtractor<'a> {
    rels: &'a Relationships,
    part_name: &'a str,

    shapes: Vec<Shape>,
    images: Vec<ImageRef>,
    has_chart: bool,
    has_table: bool,

    shape: Option<ShapeBuilder>,
    picture: Option<PictureBuilder>,

    in_nv_sp_pr: bool,
    in_sp_pr: bool,
    in_xfrm: bool,
    in_tx_body: bool,
    in_paragraph: bool,
    in_run: bool,
    in_text: bool,
    in_rpr: bool,
    in_fill: bool,
    /// The run being read is the first `a:r` of the shape's first paragraph
    capture_run: bool,
    paragraph: String,
}

impl<'a> SlideExtractor<'a> {
    fn new(part_name: &'a str, rels: &'a Relationships) -> Self {
        Self {
            rels,
            part_name,
            shapes: Vec::new(),
            images: Vec::new(),
            has_chart: false,
            has_table: false,
            shape: None,
            picture: None,
            in_nv_sp_pr: false,
            in_sp_pr: false,
            in_xfrm: false,
            in_tx_body: false,
            in_paragraph: false,
            in_run: false,
            in_text: false,
            in_rpr: false,
            in_fill: false,
            capture_run: false,
            paragraph: String::new(),
        }
    }

    fn run(mut self, xml: &str) -> Result<(Vec<Shape>, Vec<ImageRef>, bool, bool)> {
        let mut reader = quick_xml::Reader::from_str(xml);
        // Keep whitespace inside a:t runs
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => self.open(e, false),
                Ok(Event::Empty(ref e)) => {
                    self.open(e, true);
                    // Self-closing elements never see an End event
                    self.close(e.name().local_name().as_ref());
                }
                Ok(Event::End(ref e)) => self.close(e.name().local_name().as_ref()),
                Ok(Event::Text(ref e)) if self.in_text => {
                    let text = e.unescape().map_err(|err| self.unsupported(err))?;
                    self.paragraph.push_str(&text);
                }
                Ok(Event::CData(ref e)) if self.in_text => {
                    self.paragraph.push_str(&String::from_utf8_lossy(e));
                }
                Ok(Event::Eof) => break,
                Err(err) => return Err(self.unsupported(err)),
                _ => {}
            }
            buf.clear();
        }

        if self.shape.is_some() || self.picture.is_some() {
            return Err(self.unsupported("unexpected end of document"));
        }

        Ok((self.shapes, self.images, self.has_chart, self.has_table))
    }

    fn unsupported(&self, reason: impl ToString) -> Error {
        Error::UnsupportedSlideContent {
            part: self.part_name.to_string(),
            reason: reason.to_string(),
        }
    }

    fn open(&mut self, e: &BytesStart<'_>, empty: bool) {
        let name = e.name();
        let local = name.local_name();
        match local.as_ref() {
            b"graphicFrame" => self.has_chart = true,
            b"tbl" => self.has_table = true,
            b"sp" if !empty && self.shape.is_none() => {
                self.shape = Some(ShapeBuilder::default());
            }
            b"pic" if !empty && self.picture.is_none() => {
                self.picture = Some(PictureBuilder::default());
            }
            b"nvSpPr" => self.in_nv_sp_pr = true,
            b"cNvPr" if self.in_nv_sp_pr => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.name = attr(e, b"name");
                }
            }
            b"ph" if self.in_nv_sp_pr => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.role = Some(PlaceholderRole::from_ph_type(attr(e, b"type").as_deref()));
                }
            }
            b"spPr" if !self.in_tx_body && (self.shape.is_some() || self.picture.is_some()) => {
                self.in_sp_pr = true;
            }
            b"xfrm" if self.in_sp_pr => self.in_xfrm = true,
            b"off" if self.in_xfrm => {
                if let Some(xfrm) = self.current_xfrm() {
                    xfrm.offset(e);
                }
            }
            b"ext" if self.in_xfrm => {
                if let Some(xfrm) = self.current_xfrm() {
                    xfrm.extent(e);
                }
            }
            b"blip" => {
                if let Some(picture) = self.picture.as_mut() {
                    picture.rel_id = attr(e, b"embed");
                }
            }
            b"txBody" if self.shape.is_some() => self.in_tx_body = true,
            b"p" if self.in_tx_body => {
                self.in_paragraph = true;
                self.paragraph.clear();
            }
            b"pPr" if self.in_paragraph => {
                if let Some(shape) = self.shape.as_mut() {
                    if shape.paragraphs.is_empty() {
                        if let Some(algn) = attr(e, b"algn") {
                            shape.formatting.alignment = Alignment::from_algn(&algn);
                        }
                    }
                }
            }
            b"r" if self.in_paragraph => {
                self.in_run = true;
                if let Some(shape) = self.shape.as_mut() {
                    self.capture_run = shape.paragraphs.is_empty() && !shape.first_run_done;
                    shape.first_run_done = true;
                }
            }
            b"fld" if self.in_paragraph => self.in_run = true,
            b"br" if self.in_paragraph => self.paragraph.push(' '),
            b"t" if self.in_run => self.in_text = !empty,
            b"rPr" if self.in_run => {
                self.in_rpr = true;
                if self.capture_run {
                    if let Some(shape) = self.shape.as_mut() {
                        let fmt = &mut shape.formatting;
                        fmt.bold = attr(e, b"b").is_some_and(|v| is_on(&v));
                        fmt.italic = attr(e, b"i").is_some_and(|v| is_on(&v));
                        fmt.size = attr(e, b"sz")
                            .and_then(|v| v.parse::<f32>().ok())
                            .map(|sz| sz / 100.0);
                    }
                }
            }
            b"solidFill" if self.in_rpr => self.in_fill = true,
            b"srgbClr" if self.in_fill && self.capture_run => {
                if let (Some(shape), Some(val)) = (self.shape.as_mut(), attr(e, b"val")) {
                    shape.formatting.color = Some(format!("#{}", val.to_ascii_uppercase()));
                }
            }
            b"latin" if self.in_rpr && self.capture_run => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.formatting.font = attr(e, b"typeface");
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, local: &[u8]) {
        match local {
            b"nvSpPr" => self.in_nv_sp_pr = false,
            b"spPr" => self.in_sp_pr = false,
            b"xfrm" => self.in_xfrm = false,
            b"t" => self.in_text = false,
            b"solidFill" => self.in_fill = false,
            b"rPr" => {
                self.in_rpr = false;
                self.in_fill = false;
            }
            b"r" | b"fld" if self.in_run => {
                self.in_run = false;
                self.in_text = false;
                self.capture_run = false;
            }
            b"p" if self.in_paragraph => {
                self.in_paragraph = false;
                let text: String = self.paragraph.nfc().collect();
                if let Some(shape) = self.shape.as_mut() {
                    shape.paragraphs.push(text.trim().to_string());
                }
                self.paragraph.clear();
            }
            b"txBody" => self.in_tx_body = false,
            b"sp" => {
                if let Some(shape) = self.shape.take().and_then(ShapeBuilder::finish) {
                    self.shapes.push(shape);
                }
                self.in_tx_body = false;
            }
            b"pic" => {
                if let Some(picture) = self.picture.take() {
                    match picture.rel_id {
                        Some(rel_id) if !rel_id.is_empty() => {
                            let media = self.resolve_media(&rel_id);
                            self.images.push(ImageRef {
                                rel_id,
                                position: picture.xfrm.finish(),
                                media,
                            });
                        }
                        _ => tracing::debug!("{}: picture without r:embed skipped", self.part_name),
                    }
                }
            }
            _ => {}
        }
    }

    fn current_xfrm(&mut self) -> Option<&mut XfrmBuilder> {
        if let Some(picture) = self.picture.as_mut() {
            return Some(&mut picture.xfrm);
        }
        self.shape.as_mut().map(|s| &mut s.xfrm)
    }

    fn resolve_media(&self, rel_id: &str) -> Option<String> {
        let rel = self.rels.get(rel_id)?;
        if rel.external {
            return None;
        }
        let path = OoxmlContainer::resolve_path(self.part_name, &rel.target);
        path.rsplit('/').next().map(String::from)
    }
}

fn is_on(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Derive TextItems from shapes.
///
/// Title-like shapes give one item with their non-empty paragraphs joined by
/// `\n`; every other shape gives one item per non-empty paragraph.
pub fn text_items(shapes: &[Shape]) -> Vec<TextItem> {
    let mut items = Vec::new();

    for shape in shapes {
        let kind = shape.semantic_role();
        let non_empty = shape.paragraphs.iter().filter(|p| !p.is_empty());

        let texts: Vec<String> = if kind.is_title_like() {
            let joined = non_empty.map(String::as_str).collect::<Vec<_>>().join("\n");
            vec![joined]
        } else {
            non_empty.cloned().collect()
        };

        for text in texts {
            if text.is_empty() || is_slide_number_artifact(&text) {
                continue;
            }
            items.push(TextItem {
                kind: kind.clone(),
                text,
                formatting: shape.formatting.clone(),
            });
        }
    }

    items
}

/// Extract one slide part into a [`Slide`].
///
/// Malformed XML yields [`Error::UnsupportedSlideContent`].
pub fn extract_slide(
    slide_number: usize,
    part_name: &str,
    xml: &str,
    rels: &Relationships,
) -> Result<Slide> {
    let (shapes, images, has_chart, has_table) = SlideExtractor::new(part_name, rels).run(xml)?;

    let mut slide = Slide::new(slide_number, part_name);
    slide.text_items = text_items(&shapes);
    slide.shapes = shapes;
    slide.images = images;
    slide.has_chart = has_chart;
    slide.has_table = has_table;
    Ok(slide)
}
