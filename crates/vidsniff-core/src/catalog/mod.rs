//! The reconciled catalog: one entry per distinct logical content.
//!
//! All five candidate producers feed [`Catalog::submit`]; the merge policy
//! here is the only dedup in the system. Submission never fails; a
//! candidate that cannot be placed is dropped.

mod entry;
mod policy;

pub use entry::CatalogEntry;
pub use policy::should_replace_locator;

use std::sync::Arc;

use crate::candidate::Candidate;
use crate::locator;
use crate::present::Presenter;

pub struct Catalog {
    entries: Vec<CatalogEntry>,
    presenter: Arc<dyn Presenter>,
}

impl Catalog {
    pub fn new(presenter: Arc<dyn Presenter>) -> Self {
        Self {
            entries: Vec::new(),
            presenter,
        }
    }

    /// All entries, in discovery order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reconciles one candidate into the catalog.
    ///
    /// Lookup order: content id first, then normalized identity. A candidate
    /// whose locator has no identity (`blob:`) or is empty is dropped.
    pub fn submit(&mut self, candidate: Candidate) {
        if candidate.locator.is_empty() {
            return;
        }
        let Some(normalized) = locator::normalize(&candidate.locator) else {
            return;
        };

        if candidate.content_id.is_some() {
            let by_id = self
                .entries
                .iter()
                .position(|e| e.content_id == candidate.content_id);
            if let Some(idx) = by_id {
                if self.merge_into(idx, candidate, &normalized) {
                    self.presenter.on_entry_changed(&self.entries[idx]);
                }
                return;
            }
        }

        if let Some(idx) = self.entries.iter().position(|e| e.normalized == normalized) {
            let held_id = self.entries[idx].content_id.clone();
            match (candidate.content_id.clone(), held_id) {
                (Some(id), None) => {
                    // First id wins for attachment; the entry then goes
                    // through the normal replacement policy. No cross-entry
                    // reconciliation happens here.
                    tracing::debug!(id = %id, "attached content id to identity-keyed entry");
                    self.entries[idx].content_id = Some(id);
                    self.merge_into(idx, candidate, &normalized);
                    self.presenter.on_entry_changed(&self.entries[idx]);
                }
                (Some(_), Some(_)) => {
                    // Same file claimed under a different content id; the
                    // held id wins and the candidate is dropped.
                }
                (None, _) => {
                    if self.upgrade_meta(idx, &candidate) {
                        self.presenter.on_entry_changed(&self.entries[idx]);
                    }
                }
            }
            return;
        }

        let entry = CatalogEntry::from_candidate(candidate, normalized);
        tracing::debug!(
            id = entry.content_id.as_deref().unwrap_or("-"),
            source = %entry.source,
            "new catalog entry"
        );
        self.entries.push(entry);
        if let Some(created) = self.entries.last() {
            self.presenter.on_entry_changed(created);
        }
    }

    /// Merges a candidate into the entry at `idx`; returns whether anything
    /// changed. Does not notify; callers decide.
    fn merge_into(&mut self, idx: usize, candidate: Candidate, normalized: &str) -> bool {
        let mut changed = false;
        {
            let entry = &mut self.entries[idx];
            let same_identity = entry.normalized == normalized;
            if should_replace_locator(entry.source, candidate.source, same_identity) {
                tracing::debug!(
                    id = entry.content_id.as_deref().unwrap_or("-"),
                    from = %entry.source,
                    to = %candidate.source,
                    "locator replaced by higher-trust source"
                );
                entry.locator = candidate.locator.clone();
                entry.normalized = normalized.to_string();
                entry.source = candidate.source;
                changed = true;
            }
        }
        changed | self.upgrade_meta(idx, &candidate)
    }

    /// Label grows only strictly; thumbnail fills only when absent.
    fn upgrade_meta(&mut self, idx: usize, candidate: &Candidate) -> bool {
        let entry = &mut self.entries[idx];
        let mut changed = false;
        if candidate.label.len() > entry.label.len() {
            entry.label = candidate.label.clone();
            changed = true;
        }
        if entry.thumbnail.is_none() && candidate.thumbnail.is_some() {
            entry.thumbnail = candidate.thumbnail.clone();
            changed = true;
        }
        changed
    }

    /// Marks the entry matching `content_id` active and every other entry
    /// inactive. Returns a snapshot of the newly active entry, if any.
    pub fn set_active(&mut self, content_id: Option<&str>) -> Option<CatalogEntry> {
        let mut active = None;
        for entry in &mut self.entries {
            let matched = active.is_none()
                && content_id.is_some()
                && entry.content_id.as_deref() == content_id;
            entry.active = matched;
            if matched {
                active = Some(entry.clone());
            }
        }
        active
    }

    /// Drops every entry and all identity tracking. Total and synchronous.
    pub fn clear(&mut self) {
        tracing::debug!(entries = self.entries.len(), "catalog cleared");
        self.entries.clear();
        self.presenter.on_clear();
    }
}
