//! Kinship dictionary list model (read-only reference terms).

use crate::model::list::{EntityId, ListFilter, ListItem, ScopedFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: EntityId,
    pub term: String,
    pub definition: String,
    /// BCP 47 language tag, e.g. `vi` or `en`.
    pub language: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryFilter {
    pub language: Option<String>,
    pub category: Option<String>,
}

impl ListItem for DictionaryEntry {
    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.term, self.definition)
    }
}

impl ListFilter for DictionaryFilter {}

impl ScopedFilter for DictionaryFilter {
    type Scope = ();

    fn apply_scope(&mut self, _scope: &Self::Scope) {}
}
