//! In-memory session store.
//!
//! A session tracks one deck through the pipeline. Sessions live in a
//! [`SessionStore`], a keyed map behind a `parking_lot` lock; each session
//! owns a working directory that is removed when the session is deleted.

use crate::analysis::SlideAnalysis;
use crate::error::{Error, Result};
use crate::model::Deck;
use crate::render::RenderRecord;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Pipeline stage a session has reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Created,
    Uploaded,
    Parsed,
    Analyzed,
    Redesigned,
    Exported,
    Error,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Created => "created",
            SessionStatus::Uploaded => "uploaded",
            SessionStatus::Parsed => "parsed",
            SessionStatus::Analyzed => "analyzed",
            SessionStatus::Redesigned => "redesigned",
            SessionStatus::Exported => "exported",
            SessionStatus::Error => "error",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deck's progress through the pipeline.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub status: SessionStatus,
    /// Unix seconds
    pub created_at: u64,
    pub work_dir: PathBuf,
    pub upload_path: Option<PathBuf>,
    pub deck: Option<Deck>,
    pub analyses: Option<Vec<SlideAnalysis>>,
    pub style_id: Option<String>,
    pub records: Option<Vec<RenderRecord>>,
    pub output_path: Option<PathBuf>,
    pub last_error: Option<String>,
}

impl Session {
    fn new(id: impl Into<String>, work_dir: PathBuf) -> Self {
        Self {
            id: id.into(),
            status: SessionStatus::Created,
            created_at: unix_now(),
            work_dir,
            upload_path: None,
            deck: None,
            analyses: None,
            style_id: None,
            records: None,
            output_path: None,
            last_error: None,
        }
    }

    /// Move to `status`, clearing any previous error.
    pub fn advance(&mut self, status: SessionStatus) {
        self.status = status;
        self.last_error = None;
    }

    /// Drop everything derived from the upload.
    pub fn reset_from_upload(&mut self) {
        self.deck = None;
        self.analyses = None;
        self.style_id = None;
        self.records = None;
        self.output_path = None;
    }

    /// Record a failed stage.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SessionStatus::Error;
        self.last_error = Some(message.into());
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Session ids become directory names, so only a safe alphabet is accepted.
fn validate_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidState(format!("invalid session id: {:?}", id)))
    }
}

/// Concurrent map of sessions rooted at a directory.
///
/// # Example
///
/// ```no_run
/// use redeck::session::{SessionStatus, SessionStore};
///
/// let store = SessionStore::new(std::env::temp_dir().join("redeck"));
/// let session = store.create()?;
/// store.update(&session.id, |s| s.advance(SessionStatus::Uploaded))?;
/// store.delete(&session.id)?;
/// # Ok::<(), redeck::Error>(())
/// ```
pub struct SessionStore {
    root: PathBuf,
    sessions: RwLock<HashMap<String, Session>>,
    counter: AtomicU64,
}

impl SessionStore {
    /// Create a store whose session directories live under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sessions: RwLock::new(HashMap::new()),
            counter: AtomicU64::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a session under a fresh id.
    pub fn create(&self) -> Result<Session> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        self.get_or_create(&format!("{:x}-{:x}", nanos, seq))
    }

    /// Return the session for `id`, creating it on first reference.
    pub fn get_or_create(&self, id: &str) -> Result<Session> {
        validate_id(id)?;
        if let Some(session) = self.sessions.read().get(id) {
            return Ok(session.clone());
        }

        let mut sessions = self.sessions.write();
        if let Some(session) = sessions.get(id) {
            return Ok(session.clone());
        }
        let work_dir = self.root.join(id);
        fs::create_dir_all(&work_dir)?;
        let session = Session::new(id, work_dir);
        sessions.insert(id.to_string(), session.clone());
        tracing::debug!(session = id, "session created");
        Ok(session)
    }

    /// Snapshot of a session.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().get(id).cloned()
    }

    /// Mutate a session in place and return the closure's result.
    pub fn update<T>(&self, id: &str, f: impl FnOnce(&mut Session) -> T) -> Result<T> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;
        Ok(f(session))
    }

    /// Remove a session and its working directory.
    ///
    /// Returns `false` when no session existed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.sessions.write().remove(id);
        match removed {
            Some(session) => {
                if session.work_dir.exists() {
                    fs::remove_dir_all(&session.work_dir)?;
                }
                tracing::debug!(session = id, "session deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
