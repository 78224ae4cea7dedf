//! Paginated list state engine.
//!
//! # Responsibility
//! - Own one `PagedResultState` per entity store and mutate it only through
//!   store actions.
//! - Merge pages with refresh/load-more semantics.
//!
//! # See also
//! - `crate::adapter` for scope injection and debouncing.

pub mod list_store;
pub mod pagination;
