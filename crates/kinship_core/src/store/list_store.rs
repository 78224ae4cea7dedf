//! Generic search/CRUD store over one entity service.
//!
//! # Responsibility
//! - Run searches through the injected service and merge the results.
//! - Publish every state change to subscribers through a watch channel.
//! - Forward create/update/delete/get-by-id without patching list items.
//!
//! # Invariants
//! - Fetch errors become `error` state; `items`/`page` keep their last good
//!   value.
//! - `loading` is recomputed when a fetch settles or its future is dropped,
//!   so it is never left `true` once no fetch of the current epoch is in
//!   flight.
//! - Under `DiscardSuperseded` a response is dropped once a newer request
//!   has already written results; in-order responses all apply.
//! - Under `DiscardSuperseded` a load-more started while a refresh is pending
//!   becomes a first-page refresh, so appends never land on results the
//!   pending refresh is about to replace.
//! - Responses of fetches started before `reset()` are always discarded.
//! - The bookkeeping mutex is never held across an await point.

use crate::config::{StaleResponsePolicy, StoreConfig};
use crate::logging::{sanitize_for_log, MAX_LOGGED_MESSAGE_CHARS};
use crate::model::list::EntityId;
use crate::model::paged::{ListView, PagedResultState, PaginatedList};
use crate::model::query::{ListQuery, QueryFingerprint, FIRST_PAGE};
use crate::service::{EntityService, ServiceError, ServiceResult};
use crate::store::pagination::{merge_page, MergeMode};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Paginated search state plus CRUD forwarding for one entity service.
pub struct ListStore<S: EntityService + ?Sized> {
    service: Arc<S>,
    config: StoreConfig,
    book: Mutex<FetchBook>,
    state_tx: watch::Sender<PagedResultState<S::Item>>,
}

#[derive(Debug, Default)]
struct FetchBook {
    /// Bumped by `reset()`; tickets of older epochs never write.
    epoch: u64,
    next_seq: u64,
    /// Sequence of the newest response that wrote results.
    last_applied_seq: u64,
    /// Replacing fetches of the current epoch that have not settled.
    pending_refreshes: usize,
    /// Fetches of the current epoch that have not settled.
    in_flight: usize,
    /// Fingerprint of the query whose results are displayed.
    active_fingerprint: Option<QueryFingerprint>,
}

impl FetchBook {
    /// Frees the in-flight slot of a settled or dropped fetch.
    fn release(&mut self, ticket: FetchTicket) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if ticket.replaces {
            self.pending_refreshes = self.pending_refreshes.saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FetchTicket {
    epoch: u64,
    seq: u64,
    replaces: bool,
}

struct PlannedFetch<F> {
    query: ListQuery<F>,
    mode: MergeMode,
    fingerprint: QueryFingerprint,
    ticket: FetchTicket,
}

impl<S> ListStore<S>
where
    S: EntityService + ?Sized,
{
    pub fn new(service: Arc<S>, config: StoreConfig) -> Self {
        let (state_tx, _) = watch::channel(PagedResultState::empty());
        Self {
            service,
            config,
            book: Mutex::new(FetchBook::default()),
            state_tx,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn entity_name(&self) -> &'static str {
        self.service.entity_name()
    }

    /// Returns a first-page query using the configured page size.
    pub fn query(&self, filter: S::Filter) -> ListQuery<S::Filter> {
        ListQuery::new(filter, self.config.items_per_page)
    }

    /// Fetches `query.page` and merges it.
    ///
    /// `reset_results` replaces the loaded items; otherwise the page is
    /// appended. Returns the fetched page items, or `None` when the fetch
    /// failed or its response was discarded as stale.
    pub async fn search(
        &self,
        query: ListQuery<S::Filter>,
        reset_results: bool,
    ) -> Option<Vec<S::Item>> {
        let plan = self.begin_fetch(query, reset_results);
        let mut slot = InFlightSlot {
            store: self,
            ticket: plan.ticket,
            armed: true,
        };

        let outcome = self.service.search(&plan.query).await;
        slot.armed = false;
        self.finish_fetch(plan, outcome)
    }

    /// Clears results, page, error and loading. Idempotent.
    pub fn reset(&self) {
        let mut book = self.lock_book();
        book.epoch += 1;
        book.in_flight = 0;
        book.pending_refreshes = 0;
        book.active_fingerprint = None;
        self.state_tx
            .send_modify(|state| *state = PagedResultState::empty());
        debug!(
            "event=list_reset module=store status=ok entity={} epoch={}",
            self.entity_name(),
            book.epoch
        );
    }

    /// Sets `error` without calling the service.
    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(
            "event=list_set_error module=store status=ok entity={}",
            self.entity_name()
        );
        self.state_tx
            .send_modify(|state| state.error = Some(message));
    }

    /// Creates one item remotely. Loaded list items are not patched.
    pub async fn create(&self, input: S::Create) -> ServiceResult<S::Item> {
        let result = self.service.create(input).await;
        self.log_mutation("create", None, &result);
        result
    }

    /// Updates one item remotely. Loaded list items are not patched.
    pub async fn update(&self, id: EntityId, input: S::Update) -> ServiceResult<S::Item> {
        let result = self.service.update(id, input).await;
        self.log_mutation("update", Some(id), &result);
        result
    }

    /// Deletes one item remotely. Loaded list items are not patched.
    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let result = self.service.delete(id).await;
        self.log_mutation("delete", Some(id), &result);
        result
    }

    pub async fn get_by_id(&self, id: EntityId) -> ServiceResult<S::Item> {
        let result = self.service.get_by_id(id).await;
        self.log_mutation("get_by_id", Some(id), &result);
        result
    }

    /// Returns a clone of the current state.
    pub fn snapshot(&self) -> PagedResultState<S::Item> {
        self.state_tx.borrow().clone()
    }

    /// Returns the current state projected for list renderers.
    pub fn view(&self) -> ListView<S::Item> {
        ListView::from(&*self.state_tx.borrow())
    }

    /// Subscribes to state changes. Receivers are read-only.
    pub fn subscribe(&self) -> watch::Receiver<PagedResultState<S::Item>> {
        self.state_tx.subscribe()
    }

    pub fn items(&self) -> Vec<S::Item> {
        self.state_tx.borrow().items.clone()
    }

    pub fn page(&self) -> u32 {
        self.state_tx.borrow().page
    }

    pub fn has_more(&self) -> bool {
        self.state_tx.borrow().has_more
    }

    pub fn loading(&self) -> bool {
        self.state_tx.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state_tx.borrow().error.clone()
    }

    fn begin_fetch(
        &self,
        mut query: ListQuery<S::Filter>,
        reset_results: bool,
    ) -> PlannedFetch<S::Filter> {
        let fingerprint = query.fingerprint();
        let mut book = self.lock_book();

        let mut mode = if reset_results {
            MergeMode::Replace
        } else {
            MergeMode::Append
        };
        if mode == MergeMode::Append && self.config.guard_filter_changes {
            if let Some(active) = book.active_fingerprint.as_ref() {
                if *active != fingerprint {
                    warn!(
                        "event=list_filter_changed module=store status=promoted entity={} requested_page={} active={} requested={}",
                        self.entity_name(),
                        query.page,
                        sanitize_for_log(active.as_str(), MAX_LOGGED_MESSAGE_CHARS),
                        sanitize_for_log(fingerprint.as_str(), MAX_LOGGED_MESSAGE_CHARS)
                    );
                    mode = MergeMode::Replace;
                    query.page = FIRST_PAGE;
                }
            }
        }
        if mode == MergeMode::Append
            && self.config.stale_policy == StaleResponsePolicy::DiscardSuperseded
            && book.pending_refreshes > 0
        {
            debug!(
                "event=list_load_more module=store status=promoted reason=refresh_pending entity={} requested_page={}",
                self.entity_name(),
                query.page
            );
            mode = MergeMode::Replace;
            query.page = FIRST_PAGE;
        }

        book.next_seq += 1;
        let ticket = FetchTicket {
            epoch: book.epoch,
            seq: book.next_seq,
            replaces: mode == MergeMode::Replace,
        };
        book.in_flight += 1;
        if ticket.replaces {
            book.pending_refreshes += 1;
        }

        self.state_tx.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        debug!(
            "event=list_search module=store status=start entity={} page={} mode={:?} seq={}",
            self.entity_name(),
            query.page,
            mode,
            ticket.seq
        );

        PlannedFetch {
            query,
            mode,
            fingerprint,
            ticket,
        }
    }

    fn finish_fetch(
        &self,
        plan: PlannedFetch<S::Filter>,
        outcome: ServiceResult<PaginatedList<S::Item>>,
    ) -> Option<Vec<S::Item>> {
        let mut book = self.lock_book();
        let ticket = plan.ticket;

        if ticket.epoch != book.epoch {
            debug!(
                "event=list_search module=store status=discarded reason=reset entity={} seq={}",
                self.entity_name(),
                ticket.seq
            );
            return None;
        }

        book.release(ticket);
        let loading = book.in_flight > 0;

        let superseded = self.config.stale_policy == StaleResponsePolicy::DiscardSuperseded
            && ticket.seq < book.last_applied_seq;
        if superseded {
            self.state_tx.send_modify(|state| state.loading = loading);
            debug!(
                "event=list_search module=store status=discarded reason=superseded entity={} seq={} applied={}",
                self.entity_name(),
                ticket.seq,
                book.last_applied_seq
            );
            return None;
        }

        match outcome {
            Ok(list) => {
                book.last_applied_seq = ticket.seq;
                book.active_fingerprint = Some(plan.fingerprint);
                let page = plan.query.page;
                let items_per_page = plan.query.items_per_page;
                let mut fetched = Vec::new();
                let mut loaded = 0;
                self.state_tx.send_modify(|state| {
                    fetched = merge_page(state, page, items_per_page, list, plan.mode);
                    state.loading = loading;
                    loaded = state.items.len();
                });
                info!(
                    "event=list_search module=store status=ok entity={} page={} fetched={} loaded={}",
                    self.entity_name(),
                    page,
                    fetched.len(),
                    loaded
                );
                Some(fetched)
            }
            Err(err) => {
                let message = err.user_message(&self.config.messages.unknown_error);
                self.state_tx.send_modify(|state| {
                    state.error = Some(message);
                    state.loading = loading;
                });
                warn!(
                    "event=list_search module=store status=error entity={} page={} error={}",
                    self.entity_name(),
                    plan.query.page,
                    loggable(&err)
                );
                None
            }
        }
    }

    /// Releases the in-flight slot of a fetch whose future was dropped.
    fn abandon_fetch(&self, ticket: FetchTicket) {
        let mut book = self.lock_book();
        if ticket.epoch != book.epoch {
            return;
        }
        book.release(ticket);
        let loading = book.in_flight > 0;
        self.state_tx.send_modify(|state| state.loading = loading);
        debug!(
            "event=list_search module=store status=abandoned entity={} seq={}",
            self.entity_name(),
            ticket.seq
        );
    }

    fn log_mutation<T>(&self, operation: &str, id: Option<EntityId>, result: &ServiceResult<T>) {
        let id = id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        match result {
            Ok(_) => info!(
                "event=list_mutation module=store status=ok entity={} op={} id={}",
                self.entity_name(),
                operation,
                id
            ),
            Err(err) => warn!(
                "event=list_mutation module=store status=error entity={} op={} id={} error={}",
                self.entity_name(),
                operation,
                id,
                loggable(err)
            ),
        }
    }

    fn lock_book(&self) -> MutexGuard<'_, FetchBook> {
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the in-flight slot if the owning `search` future is dropped early.
struct InFlightSlot<'a, S: EntityService + ?Sized> {
    store: &'a ListStore<S>,
    ticket: FetchTicket,
    armed: bool,
}

impl<S: EntityService + ?Sized> Drop for InFlightSlot<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            self.store.abandon_fetch(self.ticket);
        }
    }
}

fn loggable(err: &ServiceError) -> String {
    sanitize_for_log(&err.to_string(), MAX_LOGGED_MESSAGE_CHARS)
}
