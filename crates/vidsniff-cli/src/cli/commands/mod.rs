//! One module per subcommand, plus the shared replay setup.

mod fetch;
mod scan;

pub use fetch::run_fetch;
pub use scan::run_scan;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use vidsniff_core::capture::{self, NullDispatch, ReplayStats};
use vidsniff_core::catalog::CatalogEntry;
use vidsniff_core::config::SniffConfig;
use vidsniff_core::engine::SniffEngine;
use vidsniff_core::intercept::JsonParse;
use vidsniff_core::present::Presenter;
use vidsniff_core::probe::StaticPage;

/// Presenter that reports catalog changes to the log; the CLI renders its
/// own table after the replay is done.
struct LogPresenter;

impl Presenter for LogPresenter {
    fn on_entry_changed(&self, entry: &CatalogEntry) {
        tracing::debug!(
            id = entry.content_id.as_deref().unwrap_or("-"),
            source = %entry.source,
            "entry updated"
        );
    }

    fn on_active_changed(&self, entry: Option<&CatalogEntry>) {
        tracing::debug!(
            id = entry.and_then(|e| e.content_id.as_deref()).unwrap_or("-"),
            "active entry changed"
        );
    }

    fn on_scroll_to(&self, _entry: &CatalogEntry) {}

    fn on_clear(&self) {
        tracing::debug!("catalog cleared");
    }
}

/// Replays `path` through a fresh engine and marks the active entry from
/// the capture's recorded page, when it has one.
pub(crate) fn replay(cfg: &SniffConfig, path: &Path) -> Result<(SniffEngine, ReplayStats)> {
    let (engine, mut request_tap, payload_tap) = SniffEngine::install(
        cfg.clone(),
        Arc::new(LogPresenter),
        NullDispatch,
        JsonParse,
    );
    let stats = capture::replay_capture(&mut request_tap, &payload_tap, path)?;

    if let Some(url) = &stats.page_url {
        engine
            .active_sync()
            .tick(&StaticPage::new(url.clone()));
    }

    Ok((engine, stats))
}

/// Shortens a label for one table cell.
pub(crate) fn cell(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
