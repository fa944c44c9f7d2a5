//! Request-initiation tap: observe every outgoing target locator.

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::candidate::{Candidate, SourceKind};
use crate::catalog::Catalog;

use super::matches_cdn_hint;

/// The network-request initiation primitive being decorated.
pub trait RequestDispatch {
    type Response;

    fn dispatch(&mut self, url: &str) -> Self::Response;
}

/// Observing decorator around a [`RequestDispatch`].
///
/// Every dispatched locator is checked against the CDN hints; matches are
/// submitted as `Net` candidates. The wrapped dispatcher always runs,
/// unmodified, whatever the observation does.
pub struct RequestTap<D> {
    inner: D,
    hints: Vec<String>,
    catalog: Arc<Mutex<Catalog>>,
}

impl<D: RequestDispatch> RequestTap<D> {
    pub fn new(inner: D, hints: Vec<String>, catalog: Arc<Mutex<Catalog>>) -> Self {
        Self {
            inner,
            hints,
            catalog,
        }
    }

    fn observe(&self, url: &str) {
        if !matches_cdn_hint(url, &self.hints) {
            return;
        }
        // protocol-relative locators come through without a scheme
        let locator = if url.starts_with("//") {
            format!("https:{url}")
        } else {
            url.to_string()
        };
        let candidate = Candidate {
            locator,
            content_id: None,
            label: stream_label(),
            thumbnail: None,
            source: SourceKind::Net,
        };
        if let Ok(mut catalog) = self.catalog.lock() {
            catalog.submit(candidate);
        }
    }
}

impl<D: RequestDispatch> RequestDispatch for RequestTap<D> {
    type Response = D::Response;

    fn dispatch(&mut self, url: &str) -> Self::Response {
        self.observe(url);
        self.inner.dispatch(url)
    }
}

/// Placeholder label for a request-shaped discovery. The microsecond suffix
/// keeps rapid successive candidates distinguishable.
fn stream_label() -> String {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or(0);
    format!("stream_{:04}", micros % 10_000)
}
