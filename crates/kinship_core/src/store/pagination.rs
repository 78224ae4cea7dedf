//! Page merge and `has_more` derivation shared by every list store.
//!
//! # Invariants
//! - `Replace` discards previously loaded items; `Append` keeps them and
//!   adds the new page at the end.
//! - An empty page always yields `has_more == false`.
//! - Server totals win over the full-page heuristic.

use crate::model::paged::{PagedResultState, PaginatedList};

/// How a fetched page combines with already loaded items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Refresh semantics: the page becomes the whole result set.
    Replace,
    /// Load-more semantics: the page is appended.
    Append,
}

/// Merges `list` as page `page` into `state` and returns the fetched items.
///
/// Does not touch `loading` or `error`; callers own those flags.
pub fn merge_page<T: Clone>(
    state: &mut PagedResultState<T>,
    page: u32,
    items_per_page: u32,
    list: PaginatedList<T>,
    mode: MergeMode,
) -> Vec<T> {
    let fetched = list.items.clone();
    let page_len = list.items.len();

    match mode {
        MergeMode::Replace => state.items = list.items,
        MergeMode::Append => state.items.extend(list.items),
    }
    state.page = page;
    state.total_pages = list.total_pages;
    state.total_items = list.total_items;
    state.has_more = derive_has_more(
        page,
        page_len,
        state.items.len(),
        items_per_page,
        list.total_pages,
        list.total_items,
    );

    fetched
}

/// Decides whether another page exists after `page`.
///
/// Order of evidence: empty page, `total_pages`, `total_items` against the
/// loaded count, then "the page was full".
pub fn derive_has_more(
    page: u32,
    page_len: usize,
    loaded_len: usize,
    items_per_page: u32,
    total_pages: Option<u32>,
    total_items: Option<u64>,
) -> bool {
    if page_len == 0 {
        return false;
    }
    if let Some(total_pages) = total_pages {
        return page < total_pages;
    }
    if let Some(total_items) = total_items {
        return (loaded_len as u64) < total_items;
    }
    items_per_page > 0 && page_len >= items_per_page as usize
}

#[cfg(test)]
mod tests {
    use super::{derive_has_more, merge_page, MergeMode};
    use crate::model::paged::{PagedResultState, PaginatedList};

    fn loaded(items: &[&'static str], page: u32) -> PagedResultState<&'static str> {
        PagedResultState {
            items: items.to_vec(),
            page,
            has_more: true,
            ..PagedResultState::empty()
        }
    }

    #[test]
    fn append_keeps_existing_items_in_order() {
        let mut state = loaded(&["a", "b"], 1);
        let fetched = merge_page(
            &mut state,
            2,
            2,
            PaginatedList::new(vec!["c", "d"], 2),
            MergeMode::Append,
        );
        assert_eq!(fetched, vec!["c", "d"]);
        assert_eq!(state.items, vec!["a", "b", "c", "d"]);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn replace_discards_previous_pages() {
        let mut state = loaded(&["a", "b", "c"], 2);
        merge_page(
            &mut state,
            1,
            2,
            PaginatedList::new(vec!["x", "y"], 1),
            MergeMode::Replace,
        );
        assert_eq!(state.items, vec!["x", "y"]);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn empty_refresh_clears_items_and_has_more() {
        let mut state = loaded(&["a"], 1);
        merge_page(
            &mut state,
            1,
            10,
            PaginatedList::new(Vec::new(), 1).with_totals(0, 0),
            MergeMode::Replace,
        );
        assert!(state.items.is_empty());
        assert!(!state.has_more);
    }

    #[test]
    fn has_more_follows_total_pages() {
        assert!(derive_has_more(2, 10, 20, 10, Some(3), Some(25)));
        assert!(!derive_has_more(3, 5, 25, 10, Some(3), Some(25)));
    }

    #[test]
    fn has_more_uses_total_items_without_total_pages() {
        assert!(derive_has_more(1, 10, 10, 10, None, Some(11)));
        assert!(!derive_has_more(2, 1, 11, 10, None, Some(11)));
    }

    #[test]
    fn has_more_falls_back_to_full_page_heuristic() {
        assert!(derive_has_more(1, 10, 10, 10, None, None));
        assert!(!derive_has_more(2, 4, 14, 10, None, None));
    }

    #[test]
    fn empty_page_forces_no_more_even_with_totals() {
        assert!(!derive_has_more(2, 0, 10, 10, Some(5), Some(50)));
    }
}
