//! Synthetic PPTX packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

/// Shape tree of one slide.
#[derive(Default)]
pub struct SlideXml {
    shapes: Vec<String>,
}

impl SlideXml {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> usize {
        self.shapes.len() + 2
    }

    /// A placeholder shape; `ph_type` of `None` is a typeless (body) placeholder.
    pub fn placeholder(mut self, ph_type: Option<&str>, paragraphs: &[&str]) -> Self {
        let ph = match ph_type {
            Some(t) => format!(r#"<p:ph type="{}"/>"#, t),
            None => r#"<p:ph idx="1"/>"#.to_string(),
        };
        let shape = format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Placeholder"/><p:cNvSpPr/><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/>{}</p:sp>"#,
            self.next_id(),
            ph,
            tx_body(paragraphs)
        );
        self.shapes.push(shape);
        self
    }

    pub fn title(self, text: &str) -> Self {
        self.placeholder(Some("title"), &[text])
    }

    pub fn center_title(self, text: &str) -> Self {
        self.placeholder(Some("ctrTitle"), &[text])
    }

    pub fn subtitle(self, text: &str) -> Self {
        self.placeholder(Some("subTitle"), &[text])
    }

    pub fn body(self, paragraphs: &[&str]) -> Self {
        self.placeholder(Some("body"), paragraphs)
    }

    /// A plain text box with no placeholder.
    pub fn text_box(mut self, paragraphs: &[&str]) -> Self {
        let shape = format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="TextBox"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="914400" y="914400"/><a:ext cx="3657600" cy="914400"/></a:xfrm></p:spPr>{}</p:sp>"#,
            self.next_id(),
            tx_body(paragraphs)
        );
        self.shapes.push(shape);
        self
    }

    pub fn chart(mut self) -> Self {
        let frame = format!(
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{}" name="Chart"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="0" y="0"/><a:ext cx="4572000" cy="2743200"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"/></a:graphic></p:graphicFrame>"#,
            self.next_id()
        );
        self.shapes.push(frame);
        self
    }

    pub fn picture(mut self, rel_id: &str) -> Self {
        let pic = format!(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{}" name="Picture"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{}"/></p:blipFill><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="914400" cy="914400"/></a:xfrm></p:spPr></p:pic>"#,
            self.next_id(),
            rel_id
        );
        self.shapes.push(pic);
        self
    }

    pub fn build(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
            NS,
            self.shapes.concat()
        )
    }
}

fn tx_body(paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| {
            if p.is_empty() {
                "<a:p/>".to_string()
            } else {
                format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>", p)
            }
        })
        .collect();
    format!("<p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody>", body)
}

/// Builder for a complete package.
pub struct DeckBuilder {
    cx: i64,
    cy: i64,
    slides: Vec<(usize, String)>,
    media: Vec<(String, Vec<u8>)>,
    title: Option<String>,
    theme: bool,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self {
            cx: 12_192_000,
            cy: 6_858_000,
            slides: Vec::new(),
            media: Vec::new(),
            title: None,
            theme: false,
        }
    }
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, cx: i64, cy: i64) -> Self {
        self.cx = cx;
        self.cy = cy;
        self
    }

    /// Append a slide as the next `slideN.xml`.
    pub fn slide(mut self, slide: SlideXml) -> Self {
        let index = self.slides.len() + 1;
        self.slides.push((index, slide.build()));
        self
    }

    /// Add a slide under an explicit part index, in call order.
    pub fn slide_at(mut self, index: usize, slide: SlideXml) -> Self {
        self.slides.push((index, slide.build()));
        self
    }

    pub fn media(mut self, name: &str, data: Vec<u8>) -> Self {
        self.media.push((name.to_string(), data));
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_theme(mut self) -> Self {
        self.theme = true;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            let mut put = |name: &str, data: &[u8]| {
                zip.start_file(name, options).unwrap();
                zip.write_all(data).unwrap();
            };

            put("[Content_Types].xml", CONTENT_TYPES.as_bytes());
            put(
                "ppt/presentation.xml",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {}><p:sldSz cx="{}" cy="{}"/></p:presentation>"#,
                    NS, self.cx, self.cy
                )
                .as_bytes(),
            );
            for (index, xml) in &self.slides {
                put(&format!("ppt/slides/slide{}.xml", index), xml.as_bytes());
            }
            for (name, data) in &self.media {
                put(&format!("ppt/media/{}", name), data);
            }
            if let Some(title) = &self.title {
                put(
                    "docProps/core.xml",
                    format!(
                        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title><dc:creator>Tester</dc:creator></cp:coreProperties>"#,
                        title
                    )
                    .as_bytes(),
                );
            }
            if self.theme {
                put("ppt/theme/theme1.xml", THEME.as_bytes());
            }

            zip.finish().unwrap();
        }
        buffer
    }
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Test"><a:themeElements><a:clrScheme name="Test"><a:dk1><a:srgbClr val="111111"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:accent1><a:srgbClr val="4472C4"/></a:accent1></a:clrScheme></a:themeElements></a:theme>"#;
