//! Discovery candidates and source trust tiers.

use std::fmt;

/// Where a candidate was observed, ordered by trust.
///
/// `Api` locators come from a structured response body that names both the
/// content and its play address. `Dom` locators are read directly off a live
/// playback element. `Net` locators are inferred from the shape of an
/// outgoing request alone, with no confirmed content binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Api,
    Dom,
    Net,
}

impl SourceKind {
    /// Trust rank; higher is more trustworthy (`Api > Dom > Net`).
    pub fn rank(self) -> u8 {
        match self {
            SourceKind::Api => 2,
            SourceKind::Dom => 1,
            SourceKind::Net => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Api => "API",
            SourceKind::Dom => "DOM",
            SourceKind::Net => "NET",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A not-yet-reconciled discovery event proposing or updating a catalog entry.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Raw locator as observed; never mutated.
    pub locator: String,
    /// Application-level content id, when the source knows it.
    pub content_id: Option<String>,
    /// Human label; placeholder for `Net` candidates.
    pub label: String,
    /// Cover image locator, when the source carries one.
    pub thumbnail: Option<String>,
    pub source: SourceKind,
}
