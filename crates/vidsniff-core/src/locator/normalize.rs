//! Locator canonicalization for dedup.

/// Canonicalizes a locator into its comparable identity.
///
/// Strips the query string, drops one trailing `/`, and percent-decodes the
/// result, so the same file reached with different signatures or encodings
/// compares equal. `blob:` locators are session-local and not independently
/// fetchable, so they have no identity (`None`). A locator that fails URL
/// parsing is returned verbatim; dedup degrades to exact-string matching.
///
/// Idempotent: normalizing an already-normalized locator is a no-op.
pub fn normalize(locator: &str) -> Option<String> {
    if locator.starts_with("blob:") {
        return None;
    }

    let mut url = match url::Url::parse(locator) {
        Ok(url) => url,
        Err(_) => return Some(locator.to_string()),
    };
    url.set_query(None);

    let mut cleaned = url.to_string();
    if cleaned.ends_with('/') {
        cleaned.pop();
    }

    match percent_encoding::percent_decode_str(&cleaned).decode_utf8() {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(cleaned),
    }
}
