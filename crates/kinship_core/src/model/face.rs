//! Detected face list model.
//!
//! Faces are produced server-side from uploaded photos; the client can only
//! label them with a member or clear the label.

use crate::model::list::{EntityId, FamilyId, ListFilter, ListItem, ScopedFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub id: EntityId,
    pub family_id: FamilyId,
    pub photo_id: EntityId,
    /// Member this face is labeled with, if any.
    pub member_id: Option<EntityId>,
    pub thumbnail_url: String,
    /// Detector confidence, 0..=100.
    pub confidence_pct: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceFilter {
    pub family_id: Option<FamilyId>,
    pub member_id: Option<EntityId>,
    /// Only faces without a member label.
    pub unlabeled_only: bool,
}

/// Label assignment for one face. `None` clears the label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceLabel {
    pub member_id: Option<EntityId>,
}

impl ListItem for Face {
    fn id(&self) -> EntityId {
        self.id
    }

    fn search_text(&self) -> String {
        self.photo_id.to_string()
    }
}

impl ListFilter for FaceFilter {}

impl ScopedFilter for FaceFilter {
    type Scope = FamilyId;

    fn apply_scope(&mut self, scope: &Self::Scope) {
        self.family_id = Some(*scope);
    }
}
