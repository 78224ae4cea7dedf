//! Composition root for entity list stores.
//!
//! # Responsibility
//! - Build exactly one store per entity from injected services.
//! - Hand out list adapters bound to the caller's family scope.
//!
//! # Invariants
//! - Stores live as long as `AppStores`; they are reset, never rebuilt.
//! - All adapters of one entity share that entity's store.

use crate::adapter::list_adapter::ListAdapter;
use crate::config::StoreConfig;
use crate::model::list::FamilyId;
use crate::service::{DictionaryService, EventService, FaceService, FamilyService, MemberService};
use crate::store::list_store::ListStore;
use log::info;
use std::sync::Arc;

/// Entity services injected by the platform layer.
pub struct AppServices {
    pub families: Arc<FamilyService>,
    pub members: Arc<MemberService>,
    pub events: Arc<EventService>,
    pub faces: Arc<FaceService>,
    pub dictionary: Arc<DictionaryService>,
}

/// Long-lived list stores for every entity list screen.
pub struct AppStores {
    config: StoreConfig,
    families: Arc<ListStore<FamilyService>>,
    members: Arc<ListStore<MemberService>>,
    events: Arc<ListStore<EventService>>,
    faces: Arc<ListStore<FaceService>>,
    dictionary: Arc<ListStore<DictionaryService>>,
}

impl AppStores {
    pub fn new(services: AppServices, config: StoreConfig) -> Self {
        info!(
            "event=stores_init module=app status=ok items_per_page={} debounce_ms={} stale_policy={}",
            config.items_per_page,
            config.debounce.as_millis(),
            config.stale_policy.as_str()
        );
        Self {
            families: Arc::new(ListStore::new(services.families, config.clone())),
            members: Arc::new(ListStore::new(services.members, config.clone())),
            events: Arc::new(ListStore::new(services.events, config.clone())),
            faces: Arc::new(ListStore::new(services.faces, config.clone())),
            dictionary: Arc::new(ListStore::new(services.dictionary, config.clone())),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn families(&self) -> &Arc<ListStore<FamilyService>> {
        &self.families
    }

    pub fn members(&self) -> &Arc<ListStore<MemberService>> {
        &self.members
    }

    pub fn events(&self) -> &Arc<ListStore<EventService>> {
        &self.events
    }

    pub fn faces(&self) -> &Arc<ListStore<FaceService>> {
        &self.faces
    }

    pub fn dictionary(&self) -> &Arc<ListStore<DictionaryService>> {
        &self.dictionary
    }

    pub fn family_list(&self) -> ListAdapter<FamilyService> {
        ListAdapter::unscoped(self.families.clone())
    }

    pub fn member_list(&self, family_id: Option<FamilyId>) -> ListAdapter<MemberService> {
        ListAdapter::new(self.members.clone(), family_id)
    }

    pub fn event_list(&self, family_id: Option<FamilyId>) -> ListAdapter<EventService> {
        ListAdapter::new(self.events.clone(), family_id)
    }

    pub fn face_list(&self, family_id: Option<FamilyId>) -> ListAdapter<FaceService> {
        ListAdapter::new(self.faces.clone(), family_id)
    }

    pub fn dictionary_list(&self) -> ListAdapter<DictionaryService> {
        ListAdapter::unscoped(self.dictionary.clone())
    }

    /// Clears the lists that belong to the previously selected family.
    pub fn reset_family_scoped(&self) {
        self.members.reset();
        self.events.reset();
        self.faces.reset();
        info!("event=stores_reset module=app status=ok scope=family");
    }

    /// Clears every list, e.g. on logout.
    pub fn reset_all(&self) {
        self.families.reset();
        self.reset_family_scoped();
        self.dictionary.reset();
        info!("event=stores_reset module=app status=ok scope=all");
    }
}
