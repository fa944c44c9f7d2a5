//! Live media-element probe.

use std::sync::{Arc, Mutex};

use crate::candidate::{Candidate, SourceKind};
use crate::catalog::Catalog;
use crate::intercept::matches_cdn_hint;

use super::context;
use super::page::PageState;

/// Polls the page's media elements and submits one `Dom` candidate per
/// element whose bound source matches the CDN hints.
///
/// Submission is unconditional every tick; the catalog's merge policy is
/// the dedup, so repeats are cheap no-ops.
pub struct MediaProbe {
    hints: Vec<String>,
    catalog: Arc<Mutex<Catalog>>,
}

impl MediaProbe {
    pub fn new(hints: Vec<String>, catalog: Arc<Mutex<Catalog>>) -> Self {
        Self { hints, catalog }
    }

    pub fn tick(&self, page: &dyn PageState) {
        let content_id = context::current_content_id(page);
        let label = context::current_title(page);

        for source in page.media_sources() {
            if source.is_empty() || !matches_cdn_hint(&source, &self.hints) {
                continue;
            }
            let candidate = Candidate {
                locator: source,
                content_id: content_id.clone(),
                label: label.clone(),
                thumbnail: None,
                source: SourceKind::Dom,
            };
            if let Ok(mut catalog) = self.catalog.lock() {
                catalog.submit(candidate);
            }
        }
    }
}
