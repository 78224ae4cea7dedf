//! Family event (timeline) list model.

use crate::model::list::{EntityId, FamilyId, ListFilter, ListItem, ScopedFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Birth,
    Death,
    Marriage,
    Anniversary,
    Other,
}

/// Timeline row. Times are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyEvent {
    pub id: EntityId,
    pub family_id: FamilyId,
    pub title: String,
    pub kind: EventKind,
    pub start_at: i64,
    /// Should be >= `start_at` when set.
    pub end_at: Option<i64>,
    pub location: Option<String>,
}

/// Filter for the event list. `from`/`to` bound `start_at` inclusively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub family_id: Option<FamilyId>,
    pub kind: Option<EventKind>,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFamilyEvent {
    pub family_id: FamilyId,
    pub title: String,
    pub kind: EventKind,
    pub start_at: i64,
    pub end_at: Option<i64>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyEventUpdate {
    pub title: Option<String>,
    pub kind: Option<EventKind>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub location: Option<String>,
}

impl ListItem for FamilyEvent {
    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> String {
        match &self.location {
            Some(location) => format!("{} {location}", self.title),
            None => self.title.clone(),
        }
    }
}

impl ListFilter for EventFilter {}

impl ScopedFilter for EventFilter {
    type Scope = FamilyId;

    fn apply_scope(&mut self, scope: &Self::Scope) {
        self.family_id = Some(*scope);
    }
}
