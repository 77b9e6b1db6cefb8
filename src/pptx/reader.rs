//! Deck reader: container to typed [`Deck`].

use super::extract::extract_slide;
use super::theme::{first_theme_part, parse_theme_colors, part_index};
use crate::container::{attr, OoxmlContainer, Relationships};
use crate::error::{Error, Result};
use crate::model::{Deck, MediaAsset, Slide, ThemeColors, DEFAULT_SLIDE_CX, DEFAULT_SLIDE_CY};
use base64::Engine;
use quick_xml::events::Event;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const SLIDE_PREFIX: &str = "ppt/slides/slide";
const MEDIA_PREFIX: &str = "ppt/media/";

/// Options for reading a deck.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Uploads larger than this are rejected before the archive is opened
    pub max_upload_bytes: u64,
    /// Media entries at or above this size are skipped
    pub max_media_bytes: u64,
    /// Extract slides on the rayon pool
    pub parallel: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: 50 * 1024 * 1024,
            max_media_bytes: 5 * 1024 * 1024,
            parallel: true,
        }
    }
}

impl ReaderOptions {
    /// Create options with the default ceilings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upload ceiling in bytes.
    pub fn with_max_upload_bytes(mut self, bytes: u64) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Set the media ceiling in bytes.
    pub fn with_max_media_bytes(mut self, bytes: u64) -> Self {
        self.max_media_bytes = bytes;
        self
    }

    /// Enable or disable parallel slide extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// A slide part read from the archive, not yet extracted.
struct RawSlide {
    part_name: String,
    xml: String,
    rels: Relationships,
}

/// Reader for PPTX decks.
///
/// # Example
///
/// ```no_run
/// use redeck::pptx::{DeckReader, ReaderOptions};
///
/// let deck = DeckReader::open("deck.pptx", ReaderOptions::default())?.read()?;
/// println!("{} slides ({})", deck.slide_count(), deck.aspect_ratio.as_str());
/// # Ok::<(), redeck::Error>(())
/// ```
#[derive(Debug)]
pub struct DeckReader {
    container: OoxmlContainer,
    options: ReaderOptions,
}

impl DeckReader {
    /// Open a deck file.
    pub fn open(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        check_upload_size(size, &options)?;
        Self::from_container(OoxmlContainer::open(path)?, options)
    }

    /// Read a deck from bytes.
    pub fn from_bytes(data: Vec<u8>, options: ReaderOptions) -> Result<Self> {
        check_upload_size(data.len() as u64, &options)?;
        Self::from_container(OoxmlContainer::from_bytes(data)?, options)
    }

    fn from_container(container: OoxmlContainer, options: ReaderOptions) -> Result<Self> {
        if !container.exists(PRESENTATION_PART) {
            return Err(Error::MalformedDocument(format!(
                "missing {}",
                PRESENTATION_PART
            )));
        }
        Ok(Self { container, options })
    }

    /// Read the whole deck.
    ///
    /// Slides that fail to parse are skipped with a warning and the remaining
    /// slides are renumbered contiguously.
    pub fn read(&self) -> Result<Deck> {
        let (cx, cy) = self.slide_size()?;
        let mut deck = Deck::with_size(cx, cy);

        deck.metadata = self.container.parse_core_metadata();
        deck.theme = self.theme();
        deck.media = self.media();
        deck.slides = self.slides();

        tracing::info!(
            slides = deck.slides.len(),
            media = deck.media.len(),
            aspect = deck.aspect_ratio.as_str(),
            "deck parsed"
        );
        Ok(deck)
    }

    /// `p:sldSz@cx/@cy` in EMUs, with defaults when absent.
    fn slide_size(&self) -> Result<(i64, i64)> {
        let xml = self.container.read_xml(PRESENTATION_PART)?;
        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if e.name().local_name().as_ref() == b"sldSz" =>
                {
                    let cx = attr(e, b"cx")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(DEFAULT_SLIDE_CX);
                    let cy = attr(e, b"cy")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(DEFAULT_SLIDE_CY);
                    return Ok((cx, cy));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::MalformedDocument(format!(
                        "{}: {}",
                        PRESENTATION_PART, e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok((DEFAULT_SLIDE_CX, DEFAULT_SLIDE_CY))
    }

    fn theme(&self) -> ThemeColors {
        let parts = self.container.list_files_with_prefix("ppt/theme/theme");
        let Some(part) = first_theme_part(&parts) else {
            return ThemeColors::new();
        };

        match self
            .container
            .read_xml(part)
            .and_then(|xml| parse_theme_colors(&xml))
        {
            Ok(colors) => colors,
            Err(e) => {
                tracing::debug!("theme {} unreadable, using no theme colors: {}", part, e);
                ThemeColors::new()
            }
        }
    }

    fn media(&self) -> HashMap<String, MediaAsset> {
        let mut media = HashMap::new();

        for path in self.container.list_files_with_prefix(MEDIA_PREFIX) {
            let Some(filename) = path.strip_prefix(MEDIA_PREFIX).filter(|f| !f.is_empty()) else {
                continue;
            };
            let size = self.container.entry_size(&path).unwrap_or(0);
            if size >= self.options.max_media_bytes {
                tracing::debug!(
                    "media {} skipped: {} bytes exceeds the {} byte ceiling",
                    path,
                    size,
                    self.options.max_media_bytes
                );
                continue;
            }

            match self.container.read_binary(&path) {
                Ok(bytes) => {
                    media.insert(
                        filename.to_string(),
                        MediaAsset {
                            data: base64::engine::general_purpose::STANDARD.encode(&bytes),
                            mime_type: MediaAsset::mime_from_filename(filename).to_string(),
                            size: bytes.len() as u64,
                        },
                    );
                }
                Err(e) => tracing::debug!("media {} unreadable: {}", path, e),
            }
        }

        media
    }

    /// Slide part names sorted by their integer index.
    fn slide_parts(&self) -> Vec<String> {
        let mut parts: Vec<(u32, String)> = self
            .container
            .list_files_with_prefix(SLIDE_PREFIX)
            .into_iter()
            .filter_map(|name| part_index(&name, SLIDE_PREFIX).map(|idx| (idx, name)))
            .collect();
        parts.sort_by_key(|(idx, _)| *idx);
        parts.into_iter().map(|(_, name)| name).collect()
    }

    fn slides(&self) -> Vec<Slide> {
        // Archive reads are sequential, extraction is CPU-bound
        let mut raw = Vec::new();
        for part_name in self.slide_parts() {
            let xml = match self.container.read_xml(&part_name) {
                Ok(xml) => xml,
                Err(e) => {
                    tracing::warn!("slide {} skipped: {}", part_name, e);
                    continue;
                }
            };
            let rels = self
                .container
                .read_relationships(&part_name)
                .unwrap_or_else(|e| {
                    tracing::debug!("relationships of {} unreadable: {}", part_name, e);
                    Relationships::new()
                });
            raw.push(RawSlide {
                part_name,
                xml,
                rels,
            });
        }

        let extract = |raw: &RawSlide| extract_slide(0, &raw.part_name, &raw.xml, &raw.rels);
        let results: Vec<Result<Slide>> = if self.options.parallel {
            raw.par_iter().map(extract).collect()
        } else {
            raw.iter().map(extract).collect()
        };

        results
            .into_iter()
            .filter_map(|result| match result {
                Ok(slide) => Some(slide),
                Err(e) => {
                    tracing::warn!("{}", e);
                    None
                }
            })
            .enumerate()
            .map(|(idx, mut slide)| {
                slide.slide_number = idx + 1;
                slide
            })
            .collect()
    }
}

fn check_upload_size(size: u64, options: &ReaderOptions) -> Result<()> {
    if size > options.max_upload_bytes {
        return Err(Error::ResourceExhausted(format!(
            "upload of {} bytes exceeds the {} byte ceiling",
            size, options.max_upload_bytes
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn sld(text: &str) -> String {
        format!(
            r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#
        )
    }

    fn archive(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
        for (name, data) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
        buffer
    }

    const PRESENTATION: &str = r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#;

    #[test]
    fn test_missing_presentation_is_malformed() {
        let data = archive(&[("ppt/slides/slide1.xml", sld("x").into_bytes())]);
        let err = DeckReader::from_bytes(data, ReaderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_upload_ceiling() {
        let data = archive(&[(PRESENTATION_PART, PRESENTATION.as_bytes().to_vec())]);
        let options = ReaderOptions::default().with_max_upload_bytes(16);
        let err = DeckReader::from_bytes(data, options).unwrap_err();
        assert!(matches!(err, Error::ResourceExhausted(_)));
    }

    #[test]
    fn test_broken_slide_is_skipped_and_renumbered() {
        for parallel in [true, false] {
            let data = archive(&[
                (PRESENTATION_PART, PRESENTATION.as_bytes().to_vec()),
                ("ppt/slides/slide1.xml", sld("One").into_bytes()),
                ("ppt/slides/slide2.xml", b"<p:sld><p:sp></p:sld>".to_vec()),
                ("ppt/slides/slide3.xml", sld("Three").into_bytes()),
            ]);
            let options = ReaderOptions::default().with_parallel(parallel);
            let deck = DeckReader::from_bytes(data, options).unwrap().read().unwrap();

            assert_eq!(deck.slides.len(), 2);
            assert_eq!(deck.slides[0].slide_number, 1);
            assert_eq!(deck.slides[1].slide_number, 2);
            assert_eq!(deck.slides[1].title().as_deref(), Some("Three"));
            assert_eq!(deck.slides[1].part_name, "ppt/slides/slide3.xml");
        }
    }

    #[test]
    fn test_media_ceiling() {
        let data = archive(&[
            (PRESENTATION_PART, PRESENTATION.as_bytes().to_vec()),
            ("ppt/media/small.png", vec![0u8; 10]),
            ("ppt/media/large.jpg", vec![0u8; 64]),
        ]);
        let options = ReaderOptions::default().with_max_media_bytes(64);
        let deck = DeckReader::from_bytes(data, options).unwrap().read().unwrap();

        assert_eq!(deck.media.len(), 1);
        let small = &deck.media["small.png"];
        assert_eq!(small.mime_type, "image/png");
        assert_eq!(small.size, 10);
        assert_eq!(small.data, "AAAAAAAAAAAAAA==");
    }

    #[test]
    fn test_default_slide_size() {
        let data = archive(&[(
            PRESENTATION_PART,
            br#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#
                .to_vec(),
        )]);
        let deck = DeckReader::from_bytes(data, ReaderOptions::default())
            .unwrap()
            .read()
            .unwrap();
        assert_eq!(deck.width_px, 960);
        assert_eq!(deck.height_px, 720);
        assert!(deck.slides.is_empty());
    }
}
