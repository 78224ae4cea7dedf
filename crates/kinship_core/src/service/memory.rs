//! In-memory entity service.
//!
//! # Responsibility
//! - Serve paginated searches over a fixed, process-local item set.
//! - Back the CLI demo and tests where no remote service exists.
//!
//! # Invariants
//! - Items keep insertion order; pages are slices of the matching items.
//! - `total_pages` is `0` when nothing matches.
//! - Create/update are supported only when a builder was registered.

use crate::model::dictionary::{DictionaryEntry, DictionaryFilter};
use crate::model::event::{EventFilter, FamilyEvent};
use crate::model::face::{Face, FaceFilter};
use crate::model::family::{Family, FamilyFilter};
use crate::model::list::{EntityId, ListFilter, ListItem};
use crate::model::member::{Member, MemberFilter};
use crate::model::paged::PaginatedList;
use crate::model::query::{normalize_search_text, ListQuery};
use crate::service::{EntityService, ServiceError, ServiceResult};
use async_trait::async_trait;
use std::convert::Infallible;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Filter semantics used by [`MemoryEntityService`].
pub trait FilterMatch<T>: ListFilter {
    fn matches(&self, item: &T) -> bool;
}

type Creator<C, T> = Box<dyn Fn(C) -> T + Send + Sync>;
type Updater<U, T> = Box<dyn Fn(&mut T, U) + Send + Sync>;

/// Entity service over a process-local `Vec`.
pub struct MemoryEntityService<T, F, C = Infallible, U = Infallible> {
    entity: &'static str,
    items: Mutex<Vec<T>>,
    creator: Option<Creator<C, T>>,
    updater: Option<Updater<U, T>>,
    search_calls: AtomicUsize,
    _filter: PhantomData<fn(F)>,
}

impl<T, F, C, U> MemoryEntityService<T, F, C, U>
where
    T: ListItem,
    F: FilterMatch<T>,
{
    pub fn new(entity: &'static str, items: Vec<T>) -> Self {
        Self {
            entity,
            items: Mutex::new(items),
            creator: None,
            updater: None,
            search_calls: AtomicUsize::new(0),
            _filter: PhantomData,
        }
    }

    /// Enables `create` using `build` to turn input into a stored item.
    pub fn with_creator(mut self, build: impl Fn(C) -> T + Send + Sync + 'static) -> Self {
        self.creator = Some(Box::new(build));
        self
    }

    /// Enables `update` using `apply` to patch the stored item in place.
    pub fn with_updater(mut self, apply: impl Fn(&mut T, U) + Send + Sync + 'static) -> Self {
        self.updater = Some(Box::new(apply));
        self
    }

    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_items().is_empty()
    }

    /// Number of `search` calls served so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    fn lock_items(&self) -> MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn not_found(&self, id: EntityId) -> ServiceError {
        ServiceError::failure(format!("{} not found: {id}", self.entity), Some(404))
    }
}

#[async_trait]
impl<T, F, C, U> EntityService for MemoryEntityService<T, F, C, U>
where
    T: ListItem,
    F: FilterMatch<T>,
    C: Send + 'static,
    U: Send + 'static,
{
    type Item = T;
    type Filter = F;
    type Create = C;
    type Update = U;

    fn entity_name(&self) -> &'static str {
        self.entity
    }

    async fn search(&self, query: &ListQuery<F>) -> ServiceResult<PaginatedList<T>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if query.items_per_page == 0 {
            return Err(ServiceError::failure("items_per_page must be positive", Some(400)));
        }

        let needle = query.normalized_search().map(|text| text.to_lowercase());
        let matching = self
            .lock_items()
            .iter()
            .filter(|item| query.filter.matches(item))
            .filter(|item| match needle.as_deref() {
                Some(needle) => normalize_search_text(&item.search_text())
                    .map(|text| text.to_lowercase().contains(needle))
                    .unwrap_or(false),
                None => true,
            })
            .cloned()
            .collect::<Vec<_>>();

        let per_page = query.items_per_page as usize;
        let total_items = matching.len() as u64;
        let total_pages = matching.len().div_ceil(per_page) as u32;
        let start = (query.page.max(1) as usize - 1).saturating_mul(per_page);
        let items = matching
            .into_iter()
            .skip(start)
            .take(per_page)
            .collect::<Vec<_>>();

        Ok(PaginatedList::new(items, query.page).with_totals(total_pages, total_items))
    }

    async fn create(&self, input: C) -> ServiceResult<T> {
        let Some(build) = self.creator.as_ref() else {
            return Err(ServiceError::Unsupported("create"));
        };
        let item = build(input);
        self.lock_items().push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: EntityId, input: U) -> ServiceResult<T> {
        let Some(apply) = self.updater.as_ref() else {
            return Err(ServiceError::Unsupported("update"));
        };
        let mut items = self.lock_items();
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            return Err(self.not_found(id));
        };
        apply(item, input);
        Ok(item.clone())
    }

    async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let mut items = self.lock_items();
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Err(self.not_found(id));
        }
        Ok(())
    }

    async fn get_by_id(&self, id: EntityId) -> ServiceResult<T> {
        self.lock_items()
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| self.not_found(id))
    }
}

impl FilterMatch<Family> for FamilyFilter {
    fn matches(&self, item: &Family) -> bool {
        self.visibility
            .map_or(true, |visibility| item.visibility == visibility)
    }
}

impl FilterMatch<Member> for MemberFilter {
    fn matches(&self, item: &Member) -> bool {
        self.family_id.map_or(true, |id| item.family_id == id)
            && self.gender.map_or(true, |gender| item.gender == Some(gender))
            && !(self.living_only && item.is_deceased)
    }
}

impl FilterMatch<FamilyEvent> for EventFilter {
    fn matches(&self, item: &FamilyEvent) -> bool {
        self.family_id.map_or(true, |id| item.family_id == id)
            && self.kind.map_or(true, |kind| item.kind == kind)
            && self.from.map_or(true, |from| item.start_at >= from)
            && self.to.map_or(true, |to| item.start_at <= to)
    }
}

impl FilterMatch<Face> for FaceFilter {
    fn matches(&self, item: &Face) -> bool {
        self.family_id.map_or(true, |id| item.family_id == id)
            && self.member_id.map_or(true, |id| item.member_id == Some(id))
            && !(self.unlabeled_only && item.member_id.is_some())
    }
}

impl FilterMatch<DictionaryEntry> for DictionaryFilter {
    fn matches(&self, item: &DictionaryEntry) -> bool {
        self.language
            .as_deref()
            .map_or(true, |language| item.language.eq_ignore_ascii_case(language))
            && self
                .category
                .as_deref()
                .map_or(true, |category| item.category.as_deref() == Some(category))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryEntityService;
    use crate::model::list::ListItem;
    use crate::model::member::{Gender, Member, MemberFilter, MemberUpdate, NewMember};
    use crate::model::query::ListQuery;
    use crate::service::{EntityService, ServiceError};
    use uuid::Uuid;

    type Members = MemoryEntityService<Member, MemberFilter, NewMember, MemberUpdate>;

    fn member(family_id: Uuid, name: &str) -> Member {
        Member {
            id: Uuid::new_v4(),
            family_id,
            full_name: name.to_string(),
            gender: Some(Gender::Female),
            birth_date: None,
            is_deceased: false,
        }
    }

    #[tokio::test]
    async fn search_paginates_matching_items_with_totals() {
        let family = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut items = (0..5)
            .map(|index| member(family, &format!("member {index}")))
            .collect::<Vec<_>>();
        items.push(member(other, "outsider"));
        let service = Members::new("member", items);

        let filter = MemberFilter {
            family_id: Some(family),
            ..MemberFilter::default()
        };
        let page = service
            .search(&ListQuery::new(filter, 2).with_page(3))
            .await
            .expect("search should succeed");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].full_name, "member 4");
        assert_eq!(page.total_pages, Some(3));
        assert_eq!(page.total_items, Some(5));
        assert_eq!(service.search_calls(), 1);
    }

    #[tokio::test]
    async fn search_text_is_case_insensitive() {
        let family = Uuid::new_v4();
        let service = Members::new(
            "member",
            vec![member(family, "Anna Smith"), member(family, "Bao Tran")],
        );
        let query = ListQuery::new(MemberFilter::default(), 10).with_search("  anna   SMITH ");
        let page = service.search(&query).await.expect("search should succeed");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].full_name, "Anna Smith");
    }

    #[tokio::test]
    async fn create_requires_registered_builder() {
        let family = Uuid::new_v4();
        let input = NewMember {
            family_id: family,
            full_name: "New".to_string(),
            gender: None,
            birth_date: None,
        };
        let bare = Members::new("member", Vec::new());
        let err = bare.create(input.clone()).await.expect_err("create unsupported");
        assert_eq!(err, ServiceError::Unsupported("create"));

        let building = Members::new("member", Vec::new()).with_creator(|input: NewMember| Member {
            id: Uuid::new_v4(),
            family_id: input.family_id,
            full_name: input.full_name,
            gender: input.gender,
            birth_date: input.birth_date,
            is_deceased: false,
        });
        let created = building.create(input).await.expect("create should succeed");
        assert_eq!(building.len(), 1);
        let loaded = building.get_by_id(created.id()).await.expect("created member");
        assert_eq!(loaded.full_name, "New");
    }

    #[tokio::test]
    async fn delete_missing_item_returns_not_found() {
        let service = Members::new("member", Vec::new());
        let err = service.delete(Uuid::new_v4()).await.expect_err("missing member");
        assert_eq!(err.status_code(), Some(404));
    }
}
