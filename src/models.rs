use serde::{Deserialize, Serialize};

/// One tracked series entry scraped from the bookmark listing.
///
/// `latest_chapter_date` starts out `None` and is filled in exactly once
/// by the catalog lookup; it stays `None` when no match is found or the
/// lookup fails.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub title: String,
    pub last_updated: Option<String>,
    pub latest_chapter_date: Option<String>,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, last_updated: Option<String>) -> Self {
        Self {
            title: title.into(),
            last_updated,
            latest_chapter_date: None,
        }
    }
}

/// Result of fetching one bookmark listing page.
///
/// `EmptyOrDone` and `TransportError` both stop pagination; they are kept
/// distinct so the two stop conditions stay inspectable.
#[derive(Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page parsed into at least one bookmark.
    Items(Vec<Bookmark>),
    /// HTTP 200 but no bookmark items on the page; the list is exhausted.
    EmptyOrDone,
    /// Non-success status or a network failure.
    TransportError,
}

impl PageOutcome {
    /// Whether this outcome ends pagination.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PageOutcome::Items(_))
    }
}
