//! Family list model.
//!
//! Families are the top-level scope of the application; their list is the
//! only family-related list that is not itself scoped by a family id.

use crate::model::list::{EntityId, ListFilter, ListItem, ScopedFilter};
use serde::{Deserialize, Serialize};

/// Who may discover a family tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyVisibility {
    Public,
    Private,
}

/// Family row in the family picker and family list screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub visibility: FamilyVisibility,
    /// Member count as last reported by the server.
    pub member_count: u32,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Filter for the family list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyFilter {
    pub visibility: Option<FamilyVisibility>,
}

/// Input for creating a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFamily {
    pub name: String,
    pub description: Option<String>,
    pub visibility: FamilyVisibility,
}

/// Partial update for a family; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<FamilyVisibility>,
}

impl ListItem for Family {
    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> String {
        match &self.description {
            Some(description) => format!("{} {description}", self.name),
            None => self.name.clone(),
        }
    }
}

impl ListFilter for FamilyFilter {}

impl ScopedFilter for FamilyFilter {
    type Scope = ();

    fn apply_scope(&mut self, _scope: &Self::Scope) {}
}
