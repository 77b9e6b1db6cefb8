//! PPTX writer.
//!
//! Produces a minimal but complete PresentationML package: one master, one
//! blank layout, one theme and a slide per scene. Every scene element becomes
//! a preset-geometry shape, a connector or a text box.

use super::scene::{Element, Frame, Scene, TextBox, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::analysis::parse_hex;
use crate::error::Result;
use crate::model::{Alignment, EMU_PER_INCH};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const EMU_PER_POINT: f64 = 12_700.0;
/// Bullet indent in EMU.
const BULLET_INDENT: i64 = 285_750;

/// Writes scenes as a PPTX package.
#[derive(Debug, Clone, Default)]
pub struct PptxWriter {
    title: Option<String>,
}

impl PptxWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Write the package to `path`.
    ///
    /// The archive is assembled in a temporary file next to `path` and moved
    /// into place once complete; on failure the temporary file is removed.
    pub fn write(&self, scenes: &[Scene], path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        self.write_package(tmp.as_file_mut(), scenes)?;
        tmp.as_file_mut().flush()?;
        tmp.persist(path)?;

        tracing::debug!(slides = scenes.len(), "wrote pptx to {}", path.display());
        Ok(())
    }

    /// Build the package in memory.
    pub fn to_bytes(&self, scenes: &[Scene]) -> Result<Vec<u8>> {
        let cursor = self.write_package(Cursor::new(Vec::new()), scenes)?;
        Ok(cursor.into_inner())
    }

    fn write_package<W: Write + Seek>(&self, out: W, scenes: &[Scene]) -> Result<W> {
        let mut zip = ZipWriter::new(out);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let count = scenes.len();

        let part = |zip: &mut ZipWriter<W>, name: &str, data: &[u8]| -> Result<()> {
            zip.start_file(name, options)?;
            zip.write_all(data)?;
            Ok(())
        };

        part(&mut zip, "[Content_Types].xml", &content_types(count)?)?;
        part(&mut zip, "_rels/.rels", ROOT_RELS.as_bytes())?;
        part(&mut zip, "docProps/app.xml", app_xml(count).as_bytes())?;
        let title = self.title.as_deref().unwrap_or("Untitled");
        part(&mut zip, "docProps/core.xml", &core_xml(title)?)?;
        part(&mut zip, "ppt/presentation.xml", &presentation_xml(count)?)?;
        part(&mut zip, "ppt/_rels/presentation.xml.rels", &presentation_rels(count)?)?;

        for (i, scene) in scenes.iter().enumerate() {
            let number = i + 1;
            part(&mut zip, &format!("ppt/slides/slide{}.xml", number), &slide_xml(scene)?)?;
            part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                SLIDE_RELS.as_bytes(),
            )?;
        }

        part(&mut zip, "ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes())?;
        part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            MASTER_RELS.as_bytes(),
        )?;
        part(&mut zip, "ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT.as_bytes())?;
        part(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            LAYOUT_RELS.as_bytes(),
        )?;
        part(&mut zip, "ppt/theme/theme1.xml", THEME.as_bytes())?;

        Ok(zip.finish()?)
    }
}

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// `#rrggbb` to the `RRGGBB` form DrawingML expects.
fn srgb(value: &str) -> String {
    match parse_hex(value) {
        Some((r, g, b)) => format!("{:02X}{:02X}{:02X}", r, g, b),
        None => {
            tracing::debug!("unparseable color {:?} in scene, using black", value);
            "000000".to_string()
        }
    }
}

/// Thin wrapper over the quick-xml writer.
struct Xml {
    writer: Writer<Vec<u8>>,
}

impl Xml {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn element(name: &str, attrs: &[(&str, &str)]) -> BytesStart<'static> {
        let mut start = BytesStart::new(name.to_string());
        for attr in attrs {
            start.push_attribute(*attr);
        }
        start
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.writer.write_event(Event::Start(Self::element(name, attrs)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.writer.write_event(Event::Empty(Self::element(name, attrs)))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn solid_fill(&mut self, color: &str) -> Result<()> {
        self.start("a:solidFill", &[])?;
        self.empty("a:srgbClr", &[("val", &srgb(color))])?;
        self.end("a:solidFill")
    }

    fn xfrm(&mut self, frame: &Frame, flips: &[(&str, &str)]) -> Result<()> {
        self.start("a:xfrm", flips)?;
        self.empty(
            "a:off",
            &[("x", &emu(frame.x).to_string()), ("y", &emu(frame.y).to_string())],
        )?;
        self.empty(
            "a:ext",
            &[
                ("cx", &emu(frame.width.max(0.0)).to_string()),
                ("cy", &emu(frame.height.max(0.0)).to_string()),
            ],
        )?;
        self.end("a:xfrm")
    }

    fn geometry(&mut self, preset: &str) -> Result<()> {
        self.start("a:prstGeom", &[("prst", preset)])?;
        self.empty("a:avLst", &[])?;
        self.end("a:prstGeom")
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn content_types(slides: usize) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    )?;
    for (ext, content_type) in [
        ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
        ("xml", "application/xml"),
    ] {
        xml.empty("Default", &[("Extension", ext), ("ContentType", content_type)])?;
    }

    let mut overrides = vec![
        (
            "/ppt/presentation.xml".to_string(),
            "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        ),
        (
            "/ppt/slideMasters/slideMaster1.xml".to_string(),
            "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
        ),
        (
            "/ppt/slideLayouts/slideLayout1.xml".to_string(),
            "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
        ),
        (
            "/ppt/theme/theme1.xml".to_string(),
            "application/vnd.openxmlformats-officedocument.theme+xml",
        ),
        (
            "/docProps/app.xml".to_string(),
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
        (
            "/docProps/core.xml".to_string(),
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
    ];
    for i in 1..=slides {
        overrides.push((
            format!("/ppt/slides/slide{}.xml", i),
            "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
        ));
    }
    for (part, content_type) in &overrides {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }

    xml.end("Types")?;
    Ok(xml.finish())
}

fn app_xml(slides: usize) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <Application>redeck</Application>
  <PresentationFormat>On-screen Show (16:9)</PresentationFormat>
  <Slides>{}</Slides>
  <Notes>0</Notes>
  <HiddenSlides>0</HiddenSlides>
</Properties>"#,
        slides
    )
}

fn core_xml(title: &str) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.start("dc:title", &[])?;
    xml.text(title)?;
    xml.end("dc:title")?;
    xml.start("dc:creator", &[])?;
    xml.text("redeck")?;
    xml.end("dc:creator")?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

fn presentation_xml(slides: usize) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start(
        "p:presentation",
        &[
            ("xmlns:a", NS_A),
            ("xmlns:r", NS_R),
            ("xmlns:p", NS_P),
            ("saveSubsetFonts", "1"),
        ],
    )?;
    xml.start("p:sldMasterIdLst", &[])?;
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    xml.end("p:sldMasterIdLst")?;

    xml.start("p:sldIdLst", &[])?;
    for i in 1..=slides {
        let id = (255 + i).to_string();
        let rel = format!("rId{}", i + 2);
        xml.empty("p:sldId", &[("id", &id), ("r:id", &rel)])?;
    }
    xml.end("p:sldIdLst")?;

    xml.empty(
        "p:sldSz",
        &[
            ("cx", &emu(CANVAS_WIDTH).to_string()),
            ("cy", &emu(CANVAS_HEIGHT).to_string()),
        ],
    )?;
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    xml.end("p:presentation")?;
    Ok(xml.finish())
}

fn presentation_rels(slides: usize) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start("Relationships", &[("xmlns", NS_RELS)])?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster",
            ),
            ("Target", "slideMasters/slideMaster1.xml"),
        ],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId2"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme",
            ),
            ("Target", "theme/theme1.xml"),
        ],
    )?;
    for i in 1..=slides {
        let id = format!("rId{}", i + 2);
        let target = format!("slides/slide{}.xml", i);
        xml.empty(
            "Relationship",
            &[("Id", &id), ("Type", REL_SLIDE), ("Target", &target)],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

fn slide_xml(scene: &Scene) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])?;
    xml.start("p:cSld", &[])?;

    xml.start("p:bg", &[])?;
    xml.start("p:bgPr", &[])?;
    xml.solid_fill(&scene.background)?;
    xml.empty("a:effectLst", &[])?;
    xml.end("p:bgPr")?;
    xml.end("p:bg")?;

    xml.start("p:spTree", &[])?;
    xml.start("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGrpSpPr")?;
    xml.empty("p:grpSpPr", &[])?;

    for (i, element) in scene.elements.iter().enumerate() {
        // id 1 is the group itself
        let id = i + 2;
        match element {
            Element::Rect { frame, fill } => write_shape(&mut xml, id, "rect", frame, fill)?,
            Element::RoundedRect { frame, fill } => {
                write_shape(&mut xml, id, "roundRect", frame, fill)?
            }
            Element::Ellipse { frame, fill } => write_shape(&mut xml, id, "ellipse", frame, fill)?,
            Element::Line { .. } => write_connector(&mut xml, id, element)?,
            Element::Text(text) => write_text(&mut xml, id, text)?,
        }
    }

    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sld")?;
    Ok(xml.finish())
}

fn write_nv(xml: &mut Xml, id: usize, name: &str, text_box: bool) -> Result<()> {
    xml.start("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", &id.to_string()), ("name", &format!("{} {}", name, id))])?;
    if text_box {
        xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    } else {
        xml.empty("p:cNvSpPr", &[])?;
    }
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")
}

fn write_shape(xml: &mut Xml, id: usize, preset: &str, frame: &Frame, fill: &str) -> Result<()> {
    xml.start("p:sp", &[])?;
    write_nv(xml, id, "Shape", false)?;
    xml.start("p:spPr", &[])?;
    xml.xfrm(frame, &[])?;
    xml.geometry(preset)?;
    xml.solid_fill(fill)?;
    xml.start("a:ln", &[])?;
    xml.empty("a:noFill", &[])?;
    xml.end("a:ln")?;
    xml.end("p:spPr")?;
    xml.end("p:sp")
}

fn write_connector(xml: &mut Xml, id: usize, line: &Element) -> Result<()> {
    let Element::Line {
        x1,
        y1,
        x2,
        y2,
        color,
        weight,
    } = line
    else {
        return Ok(());
    };

    let mut flips = Vec::new();
    if x2 < x1 {
        flips.push(("flipH", "1"));
    }
    if y2 < y1 {
        flips.push(("flipV", "1"));
    }

    xml.start("p:cxnSp", &[])?;
    xml.start("p:nvCxnSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", &id.to_string()), ("name", &format!("Line {}", id))])?;
    xml.empty("p:cNvCxnSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvCxnSpPr")?;

    xml.start("p:spPr", &[])?;
    xml.xfrm(&line.frame(), &flips)?;
    xml.geometry("line")?;
    let width = ((weight * EMU_PER_POINT).round() as i64).to_string();
    xml.start("a:ln", &[("w", &width)])?;
    xml.solid_fill(color)?;
    xml.end("a:ln")?;
    xml.end("p:spPr")?;
    xml.end("p:cxnSp")
}

fn write_text(xml: &mut Xml, id: usize, text: &TextBox) -> Result<()> {
    xml.start("p:sp", &[])?;
    write_nv(xml, id, "Text", true)?;
    xml.start("p:spPr", &[])?;
    xml.xfrm(&text.frame, &[])?;
    xml.geometry("rect")?;
    xml.empty("a:noFill", &[])?;
    xml.end("p:spPr")?;

    xml.start("p:txBody", &[])?;
    xml.start(
        "a:bodyPr",
        &[
            ("wrap", "square"),
            ("lIns", "0"),
            ("tIns", "0"),
            ("rIns", "0"),
            ("bIns", "0"),
            ("rtlCol", "0"),
        ],
    )?;
    xml.empty("a:normAutofit", &[])?;
    xml.end("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;

    let algn = match text.alignment {
        Alignment::Left => "l",
        Alignment::Center => "ctr",
        Alignment::Right => "r",
    };
    let size = (text.size * 100).to_string();
    let margin = BULLET_INDENT.to_string();
    let indent = (-BULLET_INDENT).to_string();

    for paragraph in &text.paragraphs {
        xml.start("a:p", &[])?;
        if text.bullets {
            xml.start("a:pPr", &[("marL", &margin), ("indent", &indent), ("algn", algn)])?;
            xml.empty("a:buChar", &[("char", "\u{2022}")])?;
        } else {
            xml.start("a:pPr", &[("algn", algn)])?;
            xml.empty("a:buNone", &[])?;
        }
        xml.end("a:pPr")?;

        if paragraph.is_empty() {
            xml.empty("a:endParaRPr", &[("lang", "en-US"), ("sz", &size)])?;
        } else {
            xml.start("a:r", &[])?;
            let mut run = vec![("lang", "en-US"), ("sz", size.as_str())];
            if text.bold {
                run.push(("b", "1"));
            }
            run.push(("dirty", "0"));
            xml.start("a:rPr", &run)?;
            xml.solid_fill(&text.color)?;
            if !text.font.is_empty() {
                xml.empty("a:latin", &[("typeface", &text.font)])?;
            }
            xml.end("a:rPr")?;
            xml.start("a:t", &[])?;
            xml.text(paragraph)?;
            xml.end("a:t")?;
            xml.end("a:r")?;
        }
        xml.end("a:p")?;
    }

    xml.end("p:txBody")?;
    xml.end("p:sp")
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

const SLIDE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
</Relationships>"#;

const LAYOUT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#;

const MASTER_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#;

const SLIDE_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
  <p:cSld name="Blank">
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#;

const SLIDE_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld>
    <p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
</p:sldMaster>"#;

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="redeck">
  <a:themeElements>
    <a:clrScheme name="redeck">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="1A1A2E"/></a:dk2>
      <a:lt2><a:srgbClr val="F5F5F5"/></a:lt2>
      <a:accent1><a:srgbClr val="0077B6"/></a:accent1>
      <a:accent2><a:srgbClr val="00B4D8"/></a:accent2>
      <a:accent3><a:srgbClr val="FF6B6B"/></a:accent3>
      <a:accent4><a:srgbClr val="FFD166"/></a:accent4>
      <a:accent5><a:srgbClr val="06D6A0"/></a:accent5>
      <a:accent6><a:srgbClr val="118AB2"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="redeck">
      <a:majorFont><a:latin typeface="Arial"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Arial"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="redeck">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::OoxmlContainer;
    use crate::pptx::{DeckReader, ReaderOptions};
    use tempfile::TempDir;

    fn scenes() -> Vec<Scene> {
        let mut first = Scene::new(1, "#0077b6");
        first.push(Element::ellipse(Frame::new(8.2, -1.0, 2.6, 2.6), "#00b4d8"));
        first.push(Element::line((4.25, 2.6), (5.75, 2.6), "#00b4d8", 3.0));
        first.push(Element::Text(
            TextBox::new(
                Frame::new(0.5, 1.6, 9.0, 0.8),
                vec!["Q3 Review & Outlook".to_string()],
                44,
                "#ffffff",
            )
            .bold(true)
            .align(Alignment::Center)
            .font("Arial"),
        ));

        let mut second = Scene::new(2, "#ffffff");
        second.push(Element::Text(
            TextBox::new(
                Frame::new(0.6, 0.4, 8.8, 0.7),
                vec!["Agenda".to_string()],
                40,
                "#1a1a2e",
            )
            .bold(true),
        ));
        second.push(Element::Text(
            TextBox::new(
                Frame::new(0.6, 1.4, 8.8, 3.0),
                vec!["Numbers".to_string(), "Next steps".to_string()],
                20,
                "#1a1a2e",
            )
            .bullets(true),
        ));
        vec![first, second]
    }

    #[test]
    fn test_srgb() {
        assert_eq!(srgb("#0077b6"), "0077B6");
        assert_eq!(srgb("nope"), "000000");
        assert_eq!(emu(10.0), 9_144_000);
        assert_eq!(emu(5.625), 5_143_500);
    }

    #[test]
    fn test_package_parts() {
        let bytes = PptxWriter::new().with_title("Q3").to_bytes(&scenes()).unwrap();
        let container = OoxmlContainer::from_bytes(bytes).unwrap();

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
        ] {
            assert!(container.exists(part), "missing {}", part);
        }

        let presentation = container.read_xml("ppt/presentation.xml").unwrap();
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));
        assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));

        let slide = container.read_xml("ppt/slides/slide1.xml").unwrap();
        assert!(slide.contains(r#"<a:srgbClr val="0077B6"/>"#));
        assert!(slide.contains(r#"prst="ellipse""#));
        assert!(slide.contains("<p:cxnSp>"));
        assert!(slide.contains("Q3 Review &amp; Outlook"));
        assert!(slide.contains(r#"<a:rPr lang="en-US" sz="4400" b="1" dirty="0">"#));

        let core = container.read_xml("docProps/core.xml").unwrap();
        assert!(core.contains("<dc:title>Q3</dc:title>"));
    }

    #[test]
    fn test_output_reads_back() {
        let bytes = PptxWriter::new().to_bytes(&scenes()).unwrap();
        let deck = DeckReader::from_bytes(bytes, ReaderOptions::default())
            .unwrap()
            .read()
            .unwrap();

        assert_eq!(deck.slide_count(), 2);
        assert_eq!((deck.width_px, deck.height_px), (960, 540));
        assert_eq!(deck.slides[1].text_items.len(), 3);
        assert_eq!(deck.slides[1].text_items[2].text, "Next steps");
    }

    #[test]
    fn test_write_is_atomic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pptx");
        PptxWriter::new().write(&scenes(), &path).unwrap();
        assert!(path.exists());

        // Only the finished package remains in the directory
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        // The target is an existing directory, so persisting fails
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();
        assert!(PptxWriter::new().write(&scenes(), &path).is_err());

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
