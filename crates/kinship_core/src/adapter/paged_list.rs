//! Uniform paginated list contract for list-rendering collaborators.
//!
//! One renderer can drive any entity list through [`PagedList`] without
//! knowing the entity, its service or its scope.

use crate::adapter::list_adapter::ListAdapter;
use crate::model::list::{ListFilter, ListItem, ScopedFilter};
use crate::model::paged::ListView;
use crate::model::query::ListQuery;
use crate::service::EntityService;
use async_trait::async_trait;

#[async_trait]
pub trait PagedList: Send + Sync {
    type Item: ListItem;
    type Filter: ListFilter;

    fn view(&self) -> ListView<Self::Item>;

    async fn refresh(&self, query: ListQuery<Self::Filter>) -> Option<Vec<Self::Item>>;

    async fn load_more(&self, query: ListQuery<Self::Filter>) -> Option<Vec<Self::Item>>;

    fn reset(&self);

    fn set_error(&self, message: String);
}

#[async_trait]
impl<S> PagedList for ListAdapter<S>
where
    S: EntityService + ?Sized,
    S::Filter: ScopedFilter,
{
    type Item = S::Item;
    type Filter = S::Filter;

    fn view(&self) -> ListView<S::Item> {
        ListAdapter::view(self)
    }

    async fn refresh(&self, query: ListQuery<S::Filter>) -> Option<Vec<S::Item>> {
        ListAdapter::refresh(self, query).await
    }

    async fn load_more(&self, query: ListQuery<S::Filter>) -> Option<Vec<S::Item>> {
        ListAdapter::load_more(self, query).await
    }

    fn reset(&self) {
        ListAdapter::reset(self);
    }

    fn set_error(&self, message: String) {
        ListAdapter::set_error(self, message);
    }
}

/// Refreshes `list` and keeps loading pages while more exist, up to
/// `max_pages` pages in total. Stops at the first failed fetch.
///
/// This is the infinite-scroll loop of a list screen scrolled to the end.
pub async fn drain_pages<L>(
    list: &L,
    query: ListQuery<L::Filter>,
    max_pages: u32,
) -> ListView<L::Item>
where
    L: PagedList + ?Sized,
{
    if max_pages == 0 || list.refresh(query.clone()).await.is_none() {
        return list.view();
    }

    let mut pages = 1;
    while pages < max_pages && list.view().has_more {
        if list.load_more(query.clone()).await.is_none() {
            break;
        }
        pages += 1;
    }
    list.view()
}
