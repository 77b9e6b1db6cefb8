//! Stage functions and the session-driven service.
//!
//! [`Pipeline`] holds the stateless stages: parse, analyze, redesign. A
//! [`Service`] drives one [`Session`](crate::session::Session) per deck through
//! upload, parse, analyze, redesign, export and download, recording a status
//! transition at every step.

use crate::advisor::{
    apply_directive, collect_directives, AdvisorOptions, AdvisorRequest, DesignAdvisor,
    SlideDirective,
};
use crate::analysis::{analyze_deck, plan_colors, SlideAnalysis};
use crate::error::{Error, Result};
use crate::model::Deck;
use crate::pptx::{DeckReader, ReaderOptions};
use crate::render::{export, ExportFormat, ExportOptions, RenderRecord};
use crate::session::{Session, SessionStatus, SessionStore};
use crate::styles::{get_style, StylePreset};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const UPLOAD_NAME: &str = "upload.pptx";
const PPTX_OUTPUT: &str = "redesigned.pptx";
const HTML_OUTPUT: &str = "html";

/// Combine per-slide analyses with a style and any accepted directives.
///
/// A directive replaces the slide's layout plan, overrides the accent color
/// with its emphasis color and contributes its decorations.
pub fn plan_records(
    deck: &Deck,
    analyses: &[SlideAnalysis],
    style: &StylePreset,
    directives: &HashMap<usize, SlideDirective>,
) -> Vec<RenderRecord> {
    deck.slides
        .iter()
        .zip(analyses)
        .map(|(slide, analysis)| {
            let mut colors = plan_colors(&style.theme, analysis.content_type);
            match directives.get(&slide.slide_number) {
                Some(directive) => {
                    if let Some(color) = &directive.emphasis_color {
                        colors.accent = color.clone();
                    }
                    let layout = apply_directive(&analysis.layout, directive);
                    RenderRecord::new(slide, analysis.content_type, layout, colors)
                        .with_decorations(directive.decorations.clone())
                }
                None => RenderRecord::new(
                    slide,
                    analysis.content_type,
                    analysis.layout.clone(),
                    colors,
                ),
            }
        })
        .collect()
}

/// Stateless stage runner.
#[derive(Clone, Default)]
pub struct Pipeline {
    reader: ReaderOptions,
    advisor: Option<Arc<dyn DesignAdvisor>>,
    advisor_options: AdvisorOptions,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reader_options(mut self, options: ReaderOptions) -> Self {
        self.reader = options;
        self
    }

    /// Consult `advisor` during redesign.
    pub fn with_advisor(mut self, advisor: Arc<dyn DesignAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn with_advisor_options(mut self, options: AdvisorOptions) -> Self {
        self.advisor_options = options;
        self
    }

    pub fn reader_options(&self) -> &ReaderOptions {
        &self.reader
    }

    /// Parse a deck file.
    pub fn parse(&self, path: &Path) -> Result<Deck> {
        DeckReader::open(path, self.reader.clone())?.read()
    }

    /// Parse a deck held in memory.
    pub fn parse_bytes(&self, data: Vec<u8>) -> Result<Deck> {
        DeckReader::from_bytes(data, self.reader.clone())?.read()
    }

    /// Classify and plan every slide.
    pub fn analyze(&self, deck: &mut Deck) -> Vec<SlideAnalysis> {
        analyze_deck(deck)
    }

    /// Build render records, consulting the advisor when one is configured.
    pub fn redesign(
        &self,
        deck: &Deck,
        analyses: &[SlideAnalysis],
        style: &StylePreset,
    ) -> Vec<RenderRecord> {
        let directives = match &self.advisor {
            Some(advisor) => collect_directives(
                Arc::clone(advisor),
                AdvisorRequest::build(deck, analyses, style),
                &self.advisor_options,
            ),
            None => HashMap::new(),
        };
        let records = plan_records(deck, analyses, style, &directives);
        tracing::info!(
            slides = records.len(),
            style = style.id,
            directives = directives.len(),
            "deck redesigned"
        );
        records
    }
}

/// Session-driven pipeline.
///
/// # Example
///
/// ```no_run
/// use redeck::pipeline::Service;
/// use redeck::render::ExportOptions;
/// use redeck::session::SessionStore;
///
/// let service = Service::new(SessionStore::new("/tmp/redeck"));
/// let id = service.create_session()?;
/// service.upload(&id, "deck.pptx", &std::fs::read("deck.pptx")?)?;
/// service.parse(&id)?;
/// service.analyze(&id)?;
/// service.redesign(&id, "executive_minimal")?;
/// service.export(&id, &ExportOptions::new())?;
/// let output = service.download(&id)?;
/// println!("{}", output.display());
/// # Ok::<(), redeck::Error>(())
/// ```
pub struct Service {
    store: SessionStore,
    pipeline: Pipeline,
}

impl Service {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            pipeline: Pipeline::default(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn create_session(&self) -> Result<String> {
        Ok(self.store.create()?.id)
    }

    pub fn status(&self, id: &str) -> Result<SessionStatus> {
        Ok(self.session(id)?.status)
    }

    fn session(&self, id: &str) -> Result<Session> {
        self.store
            .get(id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }

    /// Mark the session failed and hand the error back.
    fn fail<T>(&self, id: &str, err: Error) -> Result<T> {
        let message = err.to_string();
        if self.store.update(id, |s| s.fail(message)).is_err() {
            tracing::debug!(session = id, "session vanished while failing");
        }
        tracing::warn!(session = id, "stage failed: {}", err);
        Err(err)
    }

    /// Store an uploaded deck in the session's working directory.
    ///
    /// Uploads above the reader's ceiling are rejected. A new upload discards
    /// every result derived from the previous one.
    pub fn upload(&self, id: &str, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let session = self.session(id)?;

        let ceiling = self.pipeline.reader.max_upload_bytes;
        if data.len() as u64 > ceiling {
            return self.fail(
                id,
                Error::ResourceExhausted(format!(
                    "upload of {} bytes exceeds {} bytes",
                    data.len(),
                    ceiling
                )),
            );
        }

        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(UPLOAD_NAME);
        let path = session.work_dir.join(name);
        if let Err(e) = fs::write(&path, data) {
            return self.fail(id, e.into());
        }

        let stored = path.clone();
        self.store.update(id, move |s| {
            s.reset_from_upload();
            s.upload_path = Some(stored);
            s.advance(SessionStatus::Uploaded);
        })?;
        tracing::info!(session = id, bytes = data.len(), "deck uploaded");
        Ok(path)
    }

    /// Parse the uploaded deck and return its slide count.
    pub fn parse(&self, id: &str) -> Result<usize> {
        let session = self.session(id)?;
        let upload = session
            .upload_path
            .ok_or_else(|| Error::InvalidState("nothing uploaded".to_string()))?;

        let deck = match self.pipeline.parse(&upload) {
            Ok(deck) => deck,
            Err(e) => return self.fail(id, e),
        };
        let count = deck.slide_count();
        self.store.update(id, move |s| {
            s.reset_from_upload();
            s.deck = Some(deck);
            s.advance(SessionStatus::Parsed);
        })?;
        Ok(count)
    }

    /// Classify and plan the parsed deck.
    pub fn analyze(&self, id: &str) -> Result<Vec<SlideAnalysis>> {
        let session = self.session(id)?;
        let mut deck = session
            .deck
            .ok_or_else(|| Error::InvalidState("deck not parsed".to_string()))?;

        let analyses = self.pipeline.analyze(&mut deck);
        let stored = analyses.clone();
        self.store.update(id, move |s| {
            s.deck = Some(deck);
            s.analyses = Some(stored);
            s.records = None;
            s.output_path = None;
            s.advance(SessionStatus::Analyzed);
        })?;
        Ok(analyses)
    }

    /// Build render records for a style.
    pub fn redesign(&self, id: &str, style_id: &str) -> Result<Vec<RenderRecord>> {
        let session = self.session(id)?;
        let style = get_style(style_id)?;
        let (deck, analyses) = match (session.deck, session.analyses) {
            (Some(deck), Some(analyses)) => (deck, analyses),
            _ => return Err(Error::InvalidState("deck not analyzed".to_string())),
        };

        let records = self.pipeline.redesign(&deck, &analyses, style);
        let stored = records.clone();
        self.store.update(id, move |s| {
            s.style_id = Some(style.id.to_string());
            s.records = Some(stored);
            s.output_path = None;
            s.advance(SessionStatus::Redesigned);
        })?;
        Ok(records)
    }

    /// Write the redesigned deck into the session's working directory.
    pub fn export(&self, id: &str, options: &ExportOptions) -> Result<PathBuf> {
        let session = self.session(id)?;
        let (records, style_id) = match (&session.records, &session.style_id) {
            (Some(records), Some(style_id)) => (records, style_id),
            _ => return Err(Error::InvalidState("deck not redesigned".to_string())),
        };
        let style = get_style(style_id)?;

        let mut options = options.clone();
        if options.title.is_none() {
            options.title = session.deck.as_ref().and_then(Deck::title);
        }
        let target = match options.format {
            ExportFormat::Pptx => session.work_dir.join(PPTX_OUTPUT),
            ExportFormat::Html => session.work_dir.join(HTML_OUTPUT),
        };

        let output = match export(records, style, &options, &target) {
            Ok(output) => output,
            Err(e) => return self.fail(id, e),
        };
        let stored = output.clone();
        self.store.update(id, move |s| {
            s.output_path = Some(stored);
            s.advance(SessionStatus::Exported);
        })?;
        Ok(output)
    }

    /// Path of the exported artifact.
    pub fn download(&self, id: &str) -> Result<PathBuf> {
        let session = self.session(id)?;
        match session.output_path {
            Some(path) if path.exists() => Ok(path),
            Some(path) => Err(Error::InvalidState(format!(
                "export missing: {}",
                path.display()
            ))),
            None => Err(Error::InvalidState("deck not exported".to_string())),
        }
    }

    /// Delete a session and its files.
    pub fn delete(&self, id: &str) -> Result<bool> {
        self.store.delete(id)
    }
}
