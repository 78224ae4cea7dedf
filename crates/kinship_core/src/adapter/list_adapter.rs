//! Scope-injecting list adapter.
//!
//! # Responsibility
//! - Hold the mandatory scope (usually the selected family) of one list.
//! - Turn refresh/load-more intents into store searches with the scope
//!   written into the filter.
//!
//! # Invariants
//! - Without a scope, no service call is made; the store's `error` is set to
//!   `messages.scope_missing` and `None` is returned.
//! - `refresh` always fetches the first page and replaces results.
//! - `load_more` fetches `store.page() + 1` and appends.

use crate::adapter::debounce::Debouncer;
use crate::model::list::ScopedFilter;
use crate::model::paged::{ListView, PagedResultState};
use crate::model::query::{ListQuery, FIRST_PAGE};
use crate::service::EntityService;
use crate::store::list_store::ListStore;
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Scope type required by the filter of service `S`.
pub type ScopeOf<S> = <<S as EntityService>::Filter as ScopedFilter>::Scope;

/// Binds a shared store to one list screen's scope.
pub struct ListAdapter<S>
where
    S: EntityService + ?Sized,
    S::Filter: ScopedFilter,
{
    store: Arc<ListStore<S>>,
    scope: Mutex<Option<ScopeOf<S>>>,
    debouncer: Debouncer,
}

impl<S> ListAdapter<S>
where
    S: EntityService + ?Sized,
    S::Filter: ScopedFilter,
{
    /// Creates an adapter; `scope == None` keeps every fetch blocked until
    /// [`ListAdapter::set_scope`] provides one.
    pub fn new(store: Arc<ListStore<S>>, scope: Option<ScopeOf<S>>) -> Self {
        let debouncer = Debouncer::new(store.config().debounce);
        Self {
            store,
            scope: Mutex::new(scope),
            debouncer,
        }
    }

    pub fn store(&self) -> &Arc<ListStore<S>> {
        &self.store
    }

    /// Returns a first-page query using the store's page size.
    pub fn query(&self, filter: S::Filter) -> ListQuery<S::Filter> {
        self.store.query(filter)
    }

    pub fn scope(&self) -> Option<ScopeOf<S>> {
        self.lock_scope().clone()
    }

    /// Replaces the scope. Loaded items are kept until the next refresh.
    pub fn set_scope(&self, scope: Option<ScopeOf<S>>) {
        debug!(
            "event=list_scope_set module=adapter status=ok entity={} present={}",
            self.store.entity_name(),
            scope.is_some()
        );
        *self.lock_scope() = scope;
    }

    /// Fetches the first page for `query` and replaces loaded items.
    pub async fn refresh(&self, mut query: ListQuery<S::Filter>) -> Option<Vec<S::Item>> {
        let scope = self.require_scope("refresh")?;
        query.filter.apply_scope(&scope);
        query.page = FIRST_PAGE;
        self.store.search(query, true).await
    }

    /// Fetches the page after the last loaded one and appends it.
    pub async fn load_more(&self, mut query: ListQuery<S::Filter>) -> Option<Vec<S::Item>> {
        let scope = self.require_scope("load_more")?;
        query.filter.apply_scope(&scope);
        query.page = self.store.page() + 1;
        self.store.search(query, false).await
    }

    /// [`ListAdapter::refresh`] after the configured debounce.
    ///
    /// Returns `None` without fetching when a newer debounced call arrived.
    pub async fn refresh_debounced(&self, query: ListQuery<S::Filter>) -> Option<Vec<S::Item>> {
        if !self.debouncer.settle().await {
            debug!(
                "event=list_refresh module=adapter status=debounced entity={}",
                self.store.entity_name()
            );
            return None;
        }
        self.refresh(query).await
    }

    /// [`ListAdapter::load_more`] after the configured debounce.
    pub async fn load_more_debounced(
        &self,
        query: ListQuery<S::Filter>,
    ) -> Option<Vec<S::Item>> {
        if !self.debouncer.settle().await {
            debug!(
                "event=list_load_more module=adapter status=debounced entity={}",
                self.store.entity_name()
            );
            return None;
        }
        self.load_more(query).await
    }

    pub fn reset(&self) {
        self.store.reset();
    }

    pub fn set_error(&self, message: impl Into<String>) {
        self.store.set_error(message);
    }

    pub fn view(&self) -> ListView<S::Item> {
        self.store.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<PagedResultState<S::Item>> {
        self.store.subscribe()
    }

    pub fn items(&self) -> Vec<S::Item> {
        self.store.items()
    }

    pub fn loading(&self) -> bool {
        self.store.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.store.error()
    }

    pub fn has_more(&self) -> bool {
        self.store.has_more()
    }

    pub fn page(&self) -> u32 {
        self.store.page()
    }

    fn require_scope(&self, operation: &str) -> Option<ScopeOf<S>> {
        let scope = self.scope();
        if scope.is_none() {
            warn!(
                "event=list_{} module=adapter status=rejected reason=scope_missing entity={}",
                operation,
                self.store.entity_name()
            );
            self.store
                .set_error(self.store.config().messages.scope_missing.clone());
        }
        scope
    }

    fn lock_scope(&self) -> MutexGuard<'_, Option<ScopeOf<S>>> {
        self.scope.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> ListAdapter<S>
where
    S: EntityService + ?Sized,
    S::Filter: ScopedFilter<Scope = ()>,
{
    /// Creates an adapter for a list that needs no scope.
    pub fn unscoped(store: Arc<ListStore<S>>) -> Self {
        Self::new(store, Some(()))
    }
}
