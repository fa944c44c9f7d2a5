//! Offline capture replay: drive the interception taps from a saved HAR.
//!
//! A browser capture already contains everything the live taps would have
//! seen: the URL of every request and the body of every structured
//! response. Replay feeds both through the same taps the live engine uses,
//! so the catalog comes out identical.

mod parse;

pub use parse::{HarContent, HarEntry, HarLog, HarPage, HarRequest, HarResponse};

use std::path::Path;

use anyhow::{Context, Result};

use crate::intercept::{PayloadParse, PayloadTap, RequestDispatch, RequestTap};

/// Dispatcher for captures: the request already ran when it was recorded.
#[derive(Debug, Default)]
pub struct NullDispatch;

impl RequestDispatch for NullDispatch {
    type Response = ();

    fn dispatch(&mut self, _url: &str) {}
}

/// What a replay fed into the taps.
#[derive(Debug)]
pub struct ReplayStats {
    /// Request URLs routed through the request tap.
    pub requests: usize,
    /// Response bodies the payload tap parsed successfully.
    pub payloads: usize,
    /// Page URL recorded in the capture, if any.
    pub page_url: Option<String>,
}

/// Replays a capture file through the taps: every request URL goes through
/// the request tap, every JSON response body through the payload tap.
/// Bodies the host itself could not have parsed are counted out silently.
pub fn replay_capture<D, P>(
    request_tap: &mut RequestTap<D>,
    payload_tap: &PayloadTap<P>,
    path: &Path,
) -> Result<ReplayStats>
where
    D: RequestDispatch,
    P: PayloadParse,
{
    let bytes = std::fs::read(path)
        .with_context(|| format!("read capture file: {}", path.display()))?;
    let har: HarLog = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse capture JSON: {}", path.display()))?;

    let mut stats = ReplayStats {
        requests: 0,
        payloads: 0,
        page_url: recorded_page_url(&har),
    };

    for entry in &har.log.entries {
        request_tap.dispatch(&entry.request.url);
        stats.requests += 1;

        let Some(content) = &entry.response.content else {
            continue;
        };
        if !content.mime_type.contains("json") {
            continue;
        }
        if let Some(text) = &content.text {
            if payload_tap.parse(text).is_ok() {
                stats.payloads += 1;
            }
        }
    }

    tracing::info!(
        requests = stats.requests,
        payloads = stats.payloads,
        "capture replayed"
    );
    Ok(stats)
}

/// First recorded page whose title is a parseable URL.
fn recorded_page_url(har: &HarLog) -> Option<String> {
    har.log
        .pages
        .iter()
        .map(|p| p.title.as_str())
        .find(|t| url::Url::parse(t).is_ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::intercept::JsonParse;
    use crate::present::NullPresenter;
    use std::io::Write as _;
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    fn write_capture(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn taps() -> (
        RequestTap<NullDispatch>,
        PayloadTap<JsonParse>,
        Arc<Mutex<Catalog>>,
    ) {
        let catalog = Arc::new(Mutex::new(Catalog::new(Arc::new(NullPresenter))));
        let hints = vec!["video/tos/cn".to_string(), "douyinvod.com".to_string()];
        (
            RequestTap::new(NullDispatch, hints, Arc::clone(&catalog)),
            PayloadTap::new(JsonParse, Arc::clone(&catalog)),
            catalog,
        )
    }

    #[test]
    fn replay_routes_urls_and_bodies() {
        let har = r#"{
            "log": {
                "version": "1.2",
                "pages": [ { "title": "https://www.example.com/video/710" } ],
                "entries": [
                    {
                        "request": { "url": "https://v.example.com/video/tos/cn/raw?sig=1" },
                        "response": { "status": 200 }
                    },
                    {
                        "request": { "url": "https://api.example.com/aweme/detail" },
                        "response": {
                            "status": 200,
                            "content": {
                                "mimeType": "application/json",
                                "text": "{\"aweme_detail\":{\"aweme_id\":\"710\",\"desc\":\"clip\",\"video\":{\"play_addr\":{\"url_list\":[\"https://v.example.com/video/tos/cn/raw\"]}}}}"
                            }
                        }
                    },
                    {
                        "request": { "url": "https://static.example.com/app.js" },
                        "response": {
                            "status": 200,
                            "content": { "mimeType": "text/javascript", "text": "var x=1;" }
                        }
                    }
                ]
            }
        }"#;
        let file = write_capture(har);
        let (mut request_tap, payload_tap, catalog) = taps();

        let stats = replay_capture(&mut request_tap, &payload_tap, file.path()).unwrap();
        assert_eq!(stats.requests, 3);
        assert_eq!(stats.payloads, 1);
        assert_eq!(
            stats.page_url.as_deref(),
            Some("https://www.example.com/video/710")
        );

        // the NET discovery and the API descriptor reconciled into one entry
        let catalog = catalog.lock().unwrap();
        assert_eq!(catalog.len(), 1);
        let entry = &catalog.entries()[0];
        assert_eq!(entry.content_id.as_deref(), Some("710"));
        assert_eq!(entry.locator, "https://v.example.com/video/tos/cn/raw");
    }

    #[test]
    fn unparseable_bodies_do_not_abort_replay() {
        let har = r#"{
            "log": {
                "version": "1.2",
                "entries": [
                    {
                        "request": { "url": "https://api.example.com/a" },
                        "response": {
                            "status": 200,
                            "content": { "mimeType": "application/json", "text": "{truncated" }
                        }
                    }
                ]
            }
        }"#;
        let file = write_capture(har);
        let (mut request_tap, payload_tap, _) = taps();

        let stats = replay_capture(&mut request_tap, &payload_tap, file.path()).unwrap();
        assert_eq!(stats.requests, 1);
        assert_eq!(stats.payloads, 0);
        assert_eq!(stats.page_url, None);
    }

    #[test]
    fn malformed_capture_is_an_error() {
        let file = write_capture("{\"log\": {}}");
        let (mut request_tap, payload_tap, _) = taps();
        assert!(replay_capture(&mut request_tap, &payload_tap, file.path()).is_err());
    }
}
