//! Read-only view of the hosting page.

/// Ambient page state the probes poll. Implementations supply the current
/// location, text lookup by selector, and the sources bound to live
/// media-playback elements. All reads are cheap and non-blocking.
pub trait PageState {
    /// Full page URL, including the query string.
    fn location(&self) -> String;

    /// Inner text of the first element matching `selector`, if any.
    fn query_text(&self, selector: &str) -> Option<String>;

    /// Bound source of every live media-playback element, in document order.
    fn media_sources(&self) -> Vec<String>;
}

/// Page state for offline captures: a fixed URL, no live elements.
#[derive(Debug, Clone)]
pub struct StaticPage {
    url: String,
}

impl StaticPage {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

impl PageState for StaticPage {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn query_text(&self, _selector: &str) -> Option<String> {
        None
    }

    fn media_sources(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Scriptable page for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FakePage {
    pub url: String,
    pub texts: Vec<(String, String)>,
    pub sources: Vec<String>,
}

#[cfg(test)]
impl PageState for FakePage {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn query_text(&self, selector: &str) -> Option<String> {
        self.texts
            .iter()
            .find(|(sel, _)| sel == selector)
            .map(|(_, text)| text.clone())
    }

    fn media_sources(&self) -> Vec<String> {
        self.sources.clone()
    }
}
