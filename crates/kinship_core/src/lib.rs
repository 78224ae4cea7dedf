//! Core list state for the Kinship family-tree app.
//! Every list screen reads its paginated results from a store in this crate.

pub mod adapter;
pub mod app;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use adapter::debounce::Debouncer;
pub use adapter::list_adapter::{ListAdapter, ScopeOf};
pub use adapter::paged_list::{drain_pages, PagedList};
pub use app::{AppServices, AppStores};
pub use config::{ConfigError, StaleResponsePolicy, StoreConfig, StoreMessages};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::list::{EntityId, FamilyId, ListFilter, ListItem, ScopedFilter};
pub use model::paged::{ListView, PagedResultState, PaginatedList};
pub use model::query::{ListQuery, QueryFingerprint, FIRST_PAGE};
pub use service::memory::{FilterMatch, MemoryEntityService};
pub use service::{
    DictionaryService, EntityService, EventService, FaceService, FamilyService, MemberService,
    ServiceError, ServiceResult,
};
pub use store::list_store::ListStore;
pub use store::pagination::{derive_has_more, merge_page, MergeMode};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
