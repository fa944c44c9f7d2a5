//! Safe filename derivation for saved downloads.

/// Default name when neither the label nor the URL path yields anything usable.
const DEFAULT_FILENAME: &str = "video.mp4";

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Derives the filename for saving an entry's bytes.
///
/// Prefers the entry label (sanitized, `.mp4` appended); falls back to the
/// last path segment of the locator, then to [`DEFAULT_FILENAME`].
pub fn derive_filename(label: &str, locator: &str) -> String {
    let from_label = sanitize_filename(label);
    if !from_label.is_empty() && from_label != "." && from_label != ".." {
        return ensure_mp4(from_label);
    }

    if let Some(segment) = filename_from_path(locator) {
        let sanitized = sanitize_filename(&segment);
        if !sanitized.is_empty() && sanitized != "." && sanitized != ".." {
            return sanitized;
        }
    }

    DEFAULT_FILENAME.to_string()
}

fn ensure_mp4(name: String) -> String {
    if name.to_ascii_lowercase().ends_with(".mp4") {
        name
    } else {
        format!("{name}.mp4")
    }
}

/// Extracts the last path segment of a locator for use as a filename hint.
///
/// Returns `None` if the locator cannot be parsed or the path is empty/root.
pub fn filename_from_path(locator: &str) -> Option<String> {
    let parsed = url::Url::parse(locator).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Sanitizes a candidate filename for safe use on a filesystem.
///
/// - Replaces NUL, `/`, `\`, control characters, and `: * ? " < > |` with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing spaces, dots, and underscores
/// - Limits length to 255 bytes
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let replaced = matches!(c, '\0' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
            || c.is_control();
        if replaced {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
