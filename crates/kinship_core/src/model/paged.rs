//! Paginated result state and service page envelopes.
//!
//! # Responsibility
//! - Describe the observable state of one list store.
//! - Describe one page returned by an entity service.
//! - Project store state into the shape list renderers consume.
//!
//! # Invariants
//! - `page == 0` means nothing has been loaded since creation or reset.
//! - `items` holds pages `1..=page` in server order.

/// Observable state of one paginated list store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedResultState<T> {
    /// Concatenated items of every loaded page.
    pub items: Vec<T>,
    /// Last loaded page, `0` before the first successful search.
    pub page: u32,
    /// Whether a subsequent page is known or assumed to exist.
    pub has_more: bool,
    /// True while a fetch issued since the last reset is in flight.
    pub loading: bool,
    /// Last fetch or precondition error, cleared when a fetch starts.
    pub error: Option<String>,
    /// Total item count reported by the service, when available.
    pub total_items: Option<u64>,
    /// Total page count reported by the service, when available.
    pub total_pages: Option<u32>,
}

impl<T> PagedResultState<T> {
    /// Returns the empty state used at creation and after reset.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            has_more: false,
            loading: false,
            error: None,
            total_items: None,
            total_pages: None,
        }
    }

    /// Returns whether nothing has been loaded yet.
    pub fn is_pristine(&self) -> bool {
        self.page == 0 && self.items.is_empty()
    }
}

impl<T> Default for PagedResultState<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// One page returned by an entity service search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    /// Page number echoed by the server.
    pub page: u32,
    pub total_pages: Option<u32>,
    pub total_items: Option<u64>,
}

impl<T> PaginatedList<T> {
    /// Creates a page without pagination metadata.
    pub fn new(items: Vec<T>, page: u32) -> Self {
        Self {
            items,
            page,
            total_pages: None,
            total_items: None,
        }
    }

    /// Attaches server-reported totals.
    pub fn with_totals(mut self, total_pages: u32, total_items: u64) -> Self {
        self.total_pages = Some(total_pages);
        self.total_items = Some(total_items);
        self
    }
}

/// Uniform list shape consumed by list-rendering collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub page: u32,
    pub total_pages: Option<u32>,
    pub total_items: Option<u64>,
}

impl<T: Clone> From<&PagedResultState<T>> for ListView<T> {
    fn from(state: &PagedResultState<T>) -> Self {
        Self {
            items: state.items.clone(),
            loading: state.loading,
            error: state.error.clone(),
            has_more: state.has_more,
            page: state.page,
            total_pages: state.total_pages,
            total_items: state.total_items,
        }
    }
}
