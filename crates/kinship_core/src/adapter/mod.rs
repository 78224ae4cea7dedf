//! Per-feature bindings between list screens and stores.
//!
//! # Responsibility
//! - Enforce the scope precondition before any fetch.
//! - Translate refresh/load-more intents into store searches.
//! - Expose one uniform list contract regardless of entity type.
//!
//! # See also
//! - `crate::store::list_store` for merge semantics.

pub mod debounce;
pub mod list_adapter;
pub mod paged_list;
