#![allow(dead_code)]

use async_trait::async_trait;
use kinship_core::model::member::{Gender, Member, MemberFilter, MemberUpdate, NewMember};
use kinship_core::{
    EntityId, EntityService, ListQuery, ListStore, MemberService, PaginatedList, ServiceError,
    ServiceResult, StoreConfig,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use uuid::Uuid;

pub type PageResult = ServiceResult<PaginatedList<Member>>;

enum Scripted {
    Ready(PageResult),
    Gated(oneshot::Receiver<PageResult>),
}

/// Member service answering searches from a scripted queue.
///
/// Gated responses let tests decide when (and in which order) in-flight
/// searches settle.
#[derive(Default)]
pub struct ScriptedMembers {
    responses: Mutex<VecDeque<Scripted>>,
    queries: Mutex<Vec<ListQuery<MemberFilter>>>,
    calls: AtomicUsize,
    fail_mutations: AtomicBool,
}

impl ScriptedMembers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_page(&self, items: Vec<Member>, total_pages: Option<u32>) {
        let mut list = PaginatedList::new(items, 0);
        list.total_pages = total_pages;
        self.push_result(Ok(list));
    }

    pub fn push_result(&self, result: PageResult) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(result));
    }

    pub fn push_error(&self, error: ServiceError) {
        self.push_result(Err(error));
    }

    /// Queues a response that settles only when the returned sender fires.
    pub fn push_gate(&self) -> oneshot::Sender<PageResult> {
        let (tx, rx) = oneshot::channel();
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Gated(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<ListQuery<MemberFilter>> {
        self.queries.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> ListQuery<MemberFilter> {
        self.queries().pop().expect("at least one search")
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn mutation_result<T>(&self, value: T) -> ServiceResult<T> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(ServiceError::failure("Member was modified by someone else", Some(409)))
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl EntityService for ScriptedMembers {
    type Item = Member;
    type Filter = MemberFilter;
    type Create = NewMember;
    type Update = MemberUpdate;

    fn entity_name(&self) -> &'static str {
        "member"
    }

    async fn search(&self, query: &ListQuery<MemberFilter>) -> PageResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        let next = self.responses.lock().unwrap().pop_front();
        let result = match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ServiceError::transport("gate dropped"))),
            None => Err(ServiceError::transport("no scripted response")),
        };
        result.map(|mut list| {
            list.page = query.page;
            list
        })
    }

    async fn create(&self, input: NewMember) -> ServiceResult<Member> {
        self.mutation_result(Member {
            id: Uuid::new_v4(),
            family_id: input.family_id,
            full_name: input.full_name,
            gender: input.gender,
            birth_date: input.birth_date,
            is_deceased: false,
        })
    }

    async fn update(&self, id: EntityId, input: MemberUpdate) -> ServiceResult<Member> {
        let mut updated = member(input.full_name.as_deref().unwrap_or("updated"));
        updated.id = id;
        self.mutation_result(updated)
    }

    async fn delete(&self, _id: EntityId) -> ServiceResult<()> {
        self.mutation_result(())
    }
}

pub fn member(name: &str) -> Member {
    Member {
        id: Uuid::new_v4(),
        family_id: Uuid::nil(),
        full_name: name.to_string(),
        gender: Some(Gender::Male),
        birth_date: None,
        is_deceased: false,
    }
}

pub fn members(names: &[&str]) -> Vec<Member> {
    names.iter().map(|name| member(name)).collect()
}

pub fn names(items: &[Member]) -> Vec<String> {
    items.iter().map(|item| item.full_name.clone()).collect()
}

pub fn member_store(
    service: &Arc<ScriptedMembers>,
    config: StoreConfig,
) -> Arc<ListStore<MemberService>> {
    let service: Arc<MemberService> = service.clone();
    Arc::new(ListStore::new(service, config))
}

pub fn member_query(page: u32) -> ListQuery<MemberFilter> {
    ListQuery::new(MemberFilter::default(), 2).with_page(page)
}

/// Yields until the service has received `count` searches.
pub async fn wait_for_calls(service: &ScriptedMembers, count: usize) {
    while service.calls() < count {
        tokio::task::yield_now().await;
    }
}
