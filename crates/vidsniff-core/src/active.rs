//! Active-entry synchronization against the page context.

use std::sync::{Arc, Mutex};

use crate::catalog::Catalog;
use crate::present::Presenter;
use crate::probe::{current_content_id, PageState};

/// Periodically cross-references the page's current content id against the
/// catalog, keeping at most one entry marked active and requesting a
/// scroll-into-view whenever the active entry changes.
pub struct ActiveSync {
    catalog: Arc<Mutex<Catalog>>,
    presenter: Arc<dyn Presenter>,
    /// Content id of the entry that was active after the previous tick.
    last_active: Option<String>,
}

impl ActiveSync {
    pub fn new(catalog: Arc<Mutex<Catalog>>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            catalog,
            presenter,
            last_active: None,
        }
    }

    pub fn tick(&mut self, page: &dyn PageState) {
        let current = current_content_id(page);
        let active = match self.catalog.lock() {
            Ok(mut catalog) => catalog.set_active(current.as_deref()),
            Err(_) => return,
        };

        let now = active.as_ref().and_then(|e| e.content_id.clone());
        if now != self.last_active {
            self.presenter.on_active_changed(active.as_ref());
            if let Some(entry) = &active {
                self.presenter.on_scroll_to(entry);
            }
            self.last_active = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{Candidate, SourceKind};
    use crate::catalog::CatalogEntry;
    use crate::probe::FakePage;

    #[derive(Default)]
    struct Recording {
        active_changes: Mutex<Vec<Option<String>>>,
        scrolls: Mutex<usize>,
    }

    impl Presenter for Recording {
        fn on_entry_changed(&self, _entry: &CatalogEntry) {}
        fn on_active_changed(&self, entry: Option<&CatalogEntry>) {
            self.active_changes
                .lock()
                .unwrap()
                .push(entry.and_then(|e| e.content_id.clone()));
        }
        fn on_scroll_to(&self, _entry: &CatalogEntry) {
            *self.scrolls.lock().unwrap() += 1;
        }
        fn on_clear(&self) {}
    }

    fn seeded() -> (ActiveSync, Arc<Mutex<Catalog>>, Arc<Recording>) {
        let presenter = Arc::new(Recording::default());
        let catalog = Arc::new(Mutex::new(Catalog::new(presenter.clone())));
        for id in ["1", "2"] {
            catalog.lock().unwrap().submit(Candidate {
                locator: format!("https://v.example.com/{id}"),
                content_id: Some(id.to_string()),
                label: format!("clip {id}"),
                thumbnail: None,
                source: SourceKind::Api,
            });
        }
        let sync = ActiveSync::new(Arc::clone(&catalog), presenter.clone());
        (sync, catalog, presenter)
    }

    fn page(url: &str) -> FakePage {
        FakePage {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn marks_matching_entry_and_scrolls_once() {
        let (mut sync, catalog, presenter) = seeded();
        let p = page("https://www.example.com/video/2");

        sync.tick(&p);
        sync.tick(&p);
        sync.tick(&p);

        let catalog = catalog.lock().unwrap();
        let active: Vec<_> = catalog.entries().iter().filter(|e| e.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].content_id.as_deref(), Some("2"));
        // change fired once, not per tick
        assert_eq!(*presenter.scrolls.lock().unwrap(), 1);
        assert_eq!(
            presenter.active_changes.lock().unwrap().as_slice(),
            [Some("2".to_string())]
        );
    }

    #[test]
    fn leaving_the_content_clears_all_flags() {
        let (mut sync, catalog, presenter) = seeded();
        sync.tick(&page("https://www.example.com/video/1"));
        sync.tick(&page("https://www.example.com/discover"));

        let catalog = catalog.lock().unwrap();
        assert_eq!(catalog.entries().iter().filter(|e| e.active).count(), 0);
        assert_eq!(
            presenter.active_changes.lock().unwrap().as_slice(),
            [Some("1".to_string()), None]
        );
    }

    #[test]
    fn unknown_id_activates_nothing() {
        let (mut sync, catalog, presenter) = seeded();
        sync.tick(&page("https://www.example.com/video/999"));

        assert_eq!(
            catalog
                .lock()
                .unwrap()
                .entries()
                .iter()
                .filter(|e| e.active)
                .count(),
            0
        );
        assert!(presenter.active_changes.lock().unwrap().is_empty());
        assert_eq!(*presenter.scrolls.lock().unwrap(), 0);
    }

    #[test]
    fn entry_appearing_after_navigation_still_scrolls() {
        let (mut sync, catalog, presenter) = seeded();
        sync.tick(&page("https://www.example.com/video/3"));
        // the content's entry arrives only after we are already watching it
        catalog.lock().unwrap().submit(Candidate {
            locator: "https://v.example.com/3".to_string(),
            content_id: Some("3".to_string()),
            label: "late clip".to_string(),
            thumbnail: None,
            source: SourceKind::Api,
        });
        sync.tick(&page("https://www.example.com/video/3"));

        assert_eq!(*presenter.scrolls.lock().unwrap(), 1);
        assert_eq!(
            presenter.active_changes.lock().unwrap().as_slice(),
            [Some("3".to_string())]
        );
    }
}
