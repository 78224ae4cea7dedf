//! Contracts every listable entity and filter must satisfy.
//!
//! # Invariants
//! - `ListItem::id` is stable for the lifetime of the remote record.
//! - `ListFilter` values serialize deterministically; the serialized form is
//!   the basis of query fingerprints.

use serde::Serialize;
use std::fmt::Debug;
use uuid::Uuid;

/// Stable remote identifier shared by all entities.
pub type EntityId = Uuid;

/// Identifier of the family that scopes most list queries.
pub type FamilyId = EntityId;

/// One row rendered by a list screen.
pub trait ListItem: Clone + Debug + Send + Sync + 'static {
    fn id(&self) -> EntityId;

    /// Text matched against `ListQuery::search_query` by in-memory services.
    fn search_text(&self) -> String;
}

/// Filter fields of one query shape, excluding pagination controls.
pub trait ListFilter: Clone + Debug + Serialize + Send + Sync + 'static {}

/// Filter that carries a mandatory scope injected by an adapter.
///
/// Unscoped filters use `Scope = ()` and a no-op `apply_scope`.
pub trait ScopedFilter: ListFilter {
    type Scope: Clone + Debug + Send + Sync + 'static;

    /// Writes the scope into the filter, overriding any caller-provided value.
    fn apply_scope(&mut self, scope: &Self::Scope);
}
