//! Family member list model.
//!
//! # Invariants
//! - Every member belongs to exactly one family (`family_id`).
//! - Member list queries are always scoped by family.

use crate::model::list::{EntityId, FamilyId, ListFilter, ListItem, ScopedFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Member row in the member list and relationship pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: EntityId,
    pub family_id: FamilyId,
    pub full_name: String,
    pub gender: Option<Gender>,
    /// Unix epoch milliseconds.
    pub birth_date: Option<i64>,
    pub is_deceased: bool,
}

/// Filter for the member list. `family_id` is injected by the adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFilter {
    pub family_id: Option<FamilyId>,
    pub gender: Option<Gender>,
    /// Excludes deceased members when set.
    pub living_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub family_id: FamilyId,
    pub full_name: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<i64>,
}

/// Partial update for a member; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberUpdate {
    pub full_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<i64>,
    pub is_deceased: Option<bool>,
}

impl ListItem for Member {
    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> String {
        self.full_name.clone()
    }
}

impl ListFilter for MemberFilter {}

impl ScopedFilter for MemberFilter {
    type Scope = FamilyId;

    fn apply_scope(&mut self, scope: &Self::Scope) {
        self.family_id = Some(*scope);
    }
}
