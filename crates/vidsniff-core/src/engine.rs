//! Engine assembly: taps first, then probes and sync.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::active::ActiveSync;
use crate::catalog::{Catalog, CatalogEntry};
use crate::config::SniffConfig;
use crate::intercept::{PayloadParse, PayloadTap, RequestDispatch, RequestTap};
use crate::present::Presenter;
use crate::probe::{MediaProbe, PageState};

/// The assembled discovery engine.
///
/// [`SniffEngine::install`] wraps the host's network-dispatch and
/// payload-parse primitives and hands the decorated versions back; it must
/// run before anything else in the process uses either primitive, so no
/// request or payload can slip past the taps. The taps stay installed for
/// the engine's whole lifetime.
pub struct SniffEngine {
    config: SniffConfig,
    catalog: Arc<Mutex<Catalog>>,
    presenter: Arc<dyn Presenter>,
}

impl SniffEngine {
    pub fn install<D, P>(
        config: SniffConfig,
        presenter: Arc<dyn Presenter>,
        dispatch: D,
        parse: P,
    ) -> (Self, RequestTap<D>, PayloadTap<P>)
    where
        D: RequestDispatch,
        P: PayloadParse,
    {
        let catalog = Arc::new(Mutex::new(Catalog::new(Arc::clone(&presenter))));
        let request_tap = RequestTap::new(dispatch, config.cdn_hints.clone(), Arc::clone(&catalog));
        let payload_tap = PayloadTap::new(parse, Arc::clone(&catalog));
        let engine = Self {
            config,
            catalog,
            presenter,
        };
        (engine, request_tap, payload_tap)
    }

    pub fn catalog(&self) -> Arc<Mutex<Catalog>> {
        Arc::clone(&self.catalog)
    }

    /// Snapshot of all entries in discovery order. Never fails; a poisoned
    /// catalog reads as empty.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.catalog
            .lock()
            .map(|c| c.entries().to_vec())
            .unwrap_or_default()
    }

    pub fn media_probe(&self) -> MediaProbe {
        MediaProbe::new(self.config.cdn_hints.clone(), Arc::clone(&self.catalog))
    }

    pub fn active_sync(&self) -> ActiveSync {
        ActiveSync::new(Arc::clone(&self.catalog), Arc::clone(&self.presenter))
    }

    /// Empties the catalog; the presenter drops its rendered rows.
    pub fn clear(&self) {
        if let Ok(mut catalog) = self.catalog.lock() {
            catalog.clear();
        }
    }

    /// Drives the media-element and active-context polls cooperatively in
    /// one task. Runs until the future is dropped; the timers are never
    /// cancelled from inside.
    pub async fn run(&self, page: Arc<dyn PageState + Send + Sync>) {
        let probe = self.media_probe();
        let mut sync = self.active_sync();
        let mut media = tokio::time::interval(Duration::from_millis(self.config.media_poll_ms));
        let mut context = tokio::time::interval(Duration::from_millis(self.config.context_poll_ms));

        loop {
            tokio::select! {
                _ = media.tick() => probe.tick(page.as_ref()),
                _ = context.tick() => sync.tick(page.as_ref()),
            }
        }
    }
}
