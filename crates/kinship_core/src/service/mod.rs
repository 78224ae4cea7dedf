//! Entity service contract consumed by list stores.
//!
//! # Responsibility
//! - Define the async data-access capability set injected into stores.
//! - Define the failure taxonomy services report.
//!
//! # Invariants
//! - `search` is the only mandatory operation; mutations default to
//!   `ServiceError::Unsupported`.
//! - Services never mutate store state; stores own their state.
//!
//! # See also
//! - `crate::store::list_store` for how results are merged.

use crate::model::dictionary::{DictionaryEntry, DictionaryFilter};
use crate::model::event::{EventFilter, FamilyEvent, FamilyEventUpdate, NewFamilyEvent};
use crate::model::face::{Face, FaceFilter, FaceLabel};
use crate::model::family::{Family, FamilyFilter, FamilyUpdate, NewFamily};
use crate::model::list::{EntityId, ListFilter, ListItem};
use crate::model::member::{Member, MemberFilter, MemberUpdate, NewMember};
use crate::model::paged::PaginatedList;
use crate::model::query::ListQuery;
use async_trait::async_trait;
use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure reported by an entity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The remote answered with a failure result.
    Failure {
        message: String,
        status_code: Option<u16>,
    },
    /// The call failed before any result was produced.
    Transport(String),
    /// The service does not implement the named operation.
    Unsupported(&'static str),
}

impl ServiceError {
    pub fn failure(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Failure {
            message: message.into(),
            status_code,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Failure { status_code, .. } => *status_code,
            Self::Transport(_) | Self::Unsupported(_) => None,
        }
    }

    /// Returns the message to show to users.
    ///
    /// Uses the service-provided text when it is non-blank and falls back to
    /// `unknown` otherwise. Unsupported operations always use `unknown`.
    pub fn user_message(&self, unknown: &str) -> String {
        let provided = match self {
            Self::Failure { message, .. } => message.trim(),
            Self::Transport(message) => message.trim(),
            Self::Unsupported(_) => "",
        };
        if provided.is_empty() {
            unknown.to_string()
        } else {
            provided.to_string()
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failure {
                message,
                status_code: Some(code),
            } => write!(f, "service failure ({code}): {message}"),
            Self::Failure {
                message,
                status_code: None,
            } => write!(f, "service failure: {message}"),
            Self::Transport(message) => write!(f, "transport failure: {message}"),
            Self::Unsupported(operation) => write!(f, "operation not supported: {operation}"),
        }
    }
}

impl Error for ServiceError {}

/// Async data-access collaborator for one entity type.
#[async_trait]
pub trait EntityService: Send + Sync {
    type Item: ListItem;
    type Filter: ListFilter;
    type Create: Send + 'static;
    type Update: Send + 'static;

    /// Short entity label used in log events (`member`, `face`, ...).
    fn entity_name(&self) -> &'static str;

    /// Fetches one page of items matching `query`.
    async fn search(
        &self,
        query: &ListQuery<Self::Filter>,
    ) -> ServiceResult<PaginatedList<Self::Item>>;

    async fn create(&self, _input: Self::Create) -> ServiceResult<Self::Item> {
        Err(ServiceError::Unsupported("create"))
    }

    async fn update(&self, _id: EntityId, _input: Self::Update) -> ServiceResult<Self::Item> {
        Err(ServiceError::Unsupported("update"))
    }

    async fn delete(&self, _id: EntityId) -> ServiceResult<()> {
        Err(ServiceError::Unsupported("delete"))
    }

    async fn get_by_id(&self, _id: EntityId) -> ServiceResult<Self::Item> {
        Err(ServiceError::Unsupported("get_by_id"))
    }
}

pub type FamilyService =
    dyn EntityService<Item = Family, Filter = FamilyFilter, Create = NewFamily, Update = FamilyUpdate>;

pub type MemberService =
    dyn EntityService<Item = Member, Filter = MemberFilter, Create = NewMember, Update = MemberUpdate>;

pub type EventService = dyn EntityService<
    Item = FamilyEvent,
    Filter = EventFilter,
    Create = NewFamilyEvent,
    Update = FamilyEventUpdate,
>;

/// Faces are detected server-side and cannot be created by clients.
pub type FaceService =
    dyn EntityService<Item = Face, Filter = FaceFilter, Create = Infallible, Update = FaceLabel>;

/// The dictionary is read-only reference data.
pub type DictionaryService = dyn EntityService<
    Item = DictionaryEntry,
    Filter = DictionaryFilter,
    Create = Infallible,
    Update = Infallible,
>;
