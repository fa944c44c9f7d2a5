//! Interception taps over the host's network and parse primitives.
//!
//! Both taps are decorators: they observe, submit candidates to the catalog,
//! and always invoke the wrapped primitive with its result preserved.
//! Install them before anything else in the process dispatches a request or
//! parses a payload; they stay installed for the whole lifetime.

mod payload;
mod request;
mod scan;

pub use payload::{JsonParse, PayloadParse, PayloadTap};
pub use request::{RequestDispatch, RequestTap};
pub use scan::scan_payload;

/// True when the locator carries one of the configured CDN/content-type
/// hint substrings marking raw video traffic.
pub fn matches_cdn_hint(locator: &str, hints: &[String]) -> bool {
    hints.iter().any(|hint| locator.contains(hint.as_str()))
}
