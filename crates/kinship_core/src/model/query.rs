//! List query model shared by every paginated store.
//!
//! # Responsibility
//! - Carry filter fields plus pagination controls for one fetch.
//! - Provide a page-independent fingerprint for filter-change detection.
//!
//! # Invariants
//! - `page` is 1-based; builders never produce page `0`.
//! - `fingerprint()` never depends on `page`.
//! - Search text differing only in surrounding or repeated whitespace
//!   fingerprints identically.

use crate::model::list::ListFilter;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// First page number of every paginated query.
pub const FIRST_PAGE: u32 = 1;

/// Filter plus pagination controls for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    /// Entity-specific filter fields.
    pub filter: F,
    /// Requested page, 1-based.
    pub page: u32,
    /// Page size requested from the service.
    pub items_per_page: u32,
    /// Free-text search, `None` when the search box is empty.
    pub search_query: Option<String>,
}

/// Page-independent identity of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryFingerprint(String);

impl QueryFingerprint {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Serialize)]
struct FingerprintView<'a, F> {
    filter: &'a F,
    items_per_page: u32,
    search: Option<String>,
}

impl<F: ListFilter> ListQuery<F> {
    /// Creates a first-page query without search text.
    pub fn new(filter: F, items_per_page: u32) -> Self {
        Self {
            filter,
            page: FIRST_PAGE,
            items_per_page,
            search_query: None,
        }
    }

    /// Sets free-text search. Blank text clears the search.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search_query = normalize_search_text(text.as_str());
        self
    }

    /// Sets the requested page, clamping `0` to the first page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(FIRST_PAGE);
        self
    }

    /// Returns search text trimmed and whitespace-collapsed.
    pub fn normalized_search(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .and_then(normalize_search_text)
    }

    /// Returns the identity of this query ignoring `page`.
    pub fn fingerprint(&self) -> QueryFingerprint {
        let view = FingerprintView {
            filter: &self.filter,
            items_per_page: self.items_per_page,
            search: self.normalized_search(),
        };
        // Filters are plain data; a failure here means a non-string map key.
        let encoded = serde_json::to_string(&view)
            .unwrap_or_else(|err| format!("unencodable-filter:{err}:{:?}", self.filter));
        QueryFingerprint(encoded)
    }
}

/// Trims and collapses whitespace; blank input yields `None`.
pub fn normalize_search_text(value: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(value.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}
