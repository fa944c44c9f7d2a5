//! Catalog entry record.

use crate::candidate::{Candidate, SourceKind};

/// Watch-page prefix of the host application; a known content id maps to
/// `<WATCH_URL_BASE><id>`.
const WATCH_URL_BASE: &str = "https://www.douyin.com/video/";

/// One reconciled record representing one piece of content.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Application-level content id, once any source has reported it.
    pub content_id: Option<String>,
    /// Best-known locator for the bytes.
    pub locator: String,
    /// Canonical identity of `locator`, the dedup key.
    pub normalized: String,
    /// Trust tier of the source that supplied `locator`.
    pub source: SourceKind,
    /// Best-known human title; only ever replaced by a longer one.
    pub label: String,
    /// Cover image locator; set at most once, never cleared.
    pub thumbnail: Option<String>,
    /// True while this entry matches the content currently on screen.
    pub active: bool,
}

impl CatalogEntry {
    pub(crate) fn from_candidate(candidate: Candidate, normalized: String) -> Self {
        Self {
            content_id: candidate.content_id,
            locator: candidate.locator,
            normalized,
            source: candidate.source,
            label: candidate.label,
            thumbnail: candidate.thumbnail,
            active: false,
        }
    }

    /// Canonical watch-page URL, when the content id is known.
    pub fn watch_url(&self) -> Option<String> {
        self.content_id
            .as_ref()
            .map(|id| format!("{WATCH_URL_BASE}{id}"))
    }
}
