//! Current-content readings from ambient page state.

use super::page::PageState;

/// Longest title kept from the page.
const TITLE_MAX_CHARS: usize = 60;

/// Page selectors that may hold the current content's description, most
/// specific first.
const TITLE_SELECTORS: [&str; 4] = [
    r#"[data-e2e="feed-video-desc"]"#,
    r#"[data-e2e="video-desc"]"#,
    "h1",
    r#"div[class*="desc"]"#,
];

const FALLBACK_TITLE: &str = "untitled video";

/// Content id currently on screen: the `modal_id` query parameter when an
/// overlay is open, else a `/video/<digits>` path segment.
pub fn current_content_id(page: &dyn PageState) -> Option<String> {
    let location = page.location();
    let url = url::Url::parse(&location).ok()?;

    if let Some((_, id)) = url.query_pairs().find(|(k, _)| k == "modal_id") {
        if !id.is_empty() {
            return Some(id.into_owned());
        }
    }

    video_path_id(url.path())
}

fn video_path_id(path: &str) -> Option<String> {
    let rest = path.split("/video/").nth(1)?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Human title for the current content: the first selector with non-empty
/// text, whitespace-collapsed and capped at 60 characters. Falls back to
/// `Video #<id>` when only the id is known.
pub fn current_title(page: &dyn PageState) -> String {
    for selector in TITLE_SELECTORS {
        if let Some(text) = page.query_text(selector) {
            let cleaned: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !cleaned.is_empty() {
                return cleaned.chars().take(TITLE_MAX_CHARS).collect();
            }
        }
    }
    match current_content_id(page) {
        Some(id) => format!("Video #{id}"),
        None => FALLBACK_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::page::FakePage;
    use super::*;

    #[test]
    fn modal_id_takes_precedence_over_path() {
        let page = FakePage {
            url: "https://www.example.com/video/111?modal_id=222".to_string(),
            ..Default::default()
        };
        assert_eq!(current_content_id(&page).as_deref(), Some("222"));
    }

    #[test]
    fn path_id_used_when_no_modal() {
        let page = FakePage {
            url: "https://www.example.com/video/7123456?from=feed".to_string(),
            ..Default::default()
        };
        assert_eq!(current_content_id(&page).as_deref(), Some("7123456"));
    }

    #[test]
    fn no_id_outside_video_pages() {
        let page = FakePage {
            url: "https://www.example.com/discover".to_string(),
            ..Default::default()
        };
        assert_eq!(current_content_id(&page), None);

        let page = FakePage {
            url: "https://www.example.com/video/not-digits".to_string(),
            ..Default::default()
        };
        assert_eq!(current_content_id(&page), None);
    }

    #[test]
    fn title_selector_priority() {
        let page = FakePage {
            url: "https://www.example.com/".to_string(),
            texts: vec![
                ("h1".to_string(), "generic heading".to_string()),
                (
                    r#"[data-e2e="feed-video-desc"]"#.to_string(),
                    "feed description".to_string(),
                ),
            ],
            ..Default::default()
        };
        assert_eq!(current_title(&page), "feed description");
    }

    #[test]
    fn title_collapsed_and_truncated() {
        let page = FakePage {
            url: "https://www.example.com/".to_string(),
            texts: vec![("h1".to_string(), format!("  a\n\nb   c{}", "x".repeat(100)))],
            ..Default::default()
        };
        let title = current_title(&page);
        assert!(title.starts_with("a b cx"));
        assert_eq!(title.chars().count(), 60);
    }

    #[test]
    fn title_falls_back_to_id_then_placeholder() {
        let page = FakePage {
            url: "https://www.example.com/video/42".to_string(),
            ..Default::default()
        };
        assert_eq!(current_title(&page), "Video #42");

        let page = FakePage {
            url: "https://www.example.com/".to_string(),
            texts: vec![("h1".to_string(), "   ".to_string())],
            ..Default::default()
        };
        assert_eq!(current_title(&page), "untitled video");
    }
}
