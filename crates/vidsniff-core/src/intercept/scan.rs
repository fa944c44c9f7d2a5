//! Recursive search of parsed payloads for the host page's video shape.

use serde_json::Value;

use crate::candidate::{Candidate, SourceKind};

/// Recursion guard for pathological payloads.
const MAX_DEPTH: usize = 64;

/// Label used when a descriptor carries no description text.
const FALLBACK_LABEL: &str = "untitled";

/// Collects one `Api` candidate per content descriptor found in `value`.
///
/// A descriptor is an object, possibly under an `aweme_detail` wrapper,
/// carrying `aweme_id` plus `video.play_addr.url_list` with at least one
/// locator; `desc` supplies the label and `video.cover.url_list` the
/// thumbnail. The generic wrappers `data` and `aweme_list` and every array
/// element are searched recursively. The shape is the host application's
/// versionless response contract; anything that does not match is ignored.
pub fn scan_payload(value: &Value) -> Vec<Candidate> {
    let mut found = Vec::new();
    walk(value, 0, &mut found);
    found
}

fn walk(value: &Value, depth: usize, found: &mut Vec<Candidate>) {
    if depth >= MAX_DEPTH {
        return;
    }
    match value {
        Value::Array(items) => {
            for item in items {
                walk(item, depth + 1, found);
            }
        }
        Value::Object(_) => {
            let detail = value
                .get("aweme_detail")
                .filter(|v| v.is_object())
                .unwrap_or(value);
            if let Some(candidate) = descriptor_candidate(detail) {
                found.push(candidate);
                return;
            }
            if let Some(data) = value.get("data") {
                walk(data, depth + 1, found);
            }
            if let Some(list) = value.get("aweme_list") {
                walk(list, depth + 1, found);
            }
        }
        _ => {}
    }
}

/// Extracts a candidate from one descriptor object, or `None` if the shape
/// does not match.
fn descriptor_candidate(obj: &Value) -> Option<Candidate> {
    let content_id = id_string(obj.get("aweme_id")?)?;
    let video = obj.get("video")?;
    let locator = video
        .get("play_addr")?
        .get("url_list")?
        .as_array()?
        .first()?
        .as_str()?
        .to_string();

    let label = obj
        .get("desc")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_LABEL.to_string());

    let thumbnail = video
        .get("cover")
        .and_then(|c| c.get("url_list"))
        .and_then(Value::as_array)
        .and_then(|l| l.first())
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(Candidate {
        locator,
        content_id: Some(content_id),
        label,
        thumbnail,
        source: SourceKind::Api,
    })
}

/// Content ids arrive as strings or bare numbers depending on the endpoint.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
