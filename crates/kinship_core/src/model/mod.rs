//! Domain models for paginated list state and family entities.
//!
//! # Responsibility
//! - Define list contracts shared by every store (`ListItem`, `ListFilter`).
//! - Define per-entity list items, filters and mutation inputs.
//!
//! # See also
//! - `crate::store` for the state engine consuming these types.

pub mod dictionary;
pub mod event;
pub mod face;
pub mod family;
pub mod list;
pub mod member;
pub mod paged;
pub mod query;
