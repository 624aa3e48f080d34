mod memory;
#[cfg(feature = "mongodb")]
mod mongo;

use axum::async_trait;
use contacts_wire::{Contact, ContactContent, ContactId, ContactPatch};
use std::sync::Arc;

pub use memory::InMemoryStorage;
#[cfg(feature = "mongodb")]
pub use mongo::{Connector, MongoStorage};

use crate::error::AppError;

/// Record oriented access to one kind of stored object.
///
/// Implementations hold no copies between calls: every operation goes to the
/// backing store.
#[async_trait]
pub trait Crud: Send + Sync + 'static {
    type Type;
    type Id;
    type NewType;
    type Patch;
    type Error;

    /// Store a new object and return the identifier the store assigned to it.
    async fn create(&self, new: Self::NewType) -> Result<Self::Id, Self::Error>;
    async fn retrieve_all(&self) -> Result<Vec<Self::Type>, Self::Error>;
    /// Merge `patch` into the object with `id`. Fails with a not found error
    /// when there is no such object.
    async fn update(&self, id: &Self::Id, patch: Self::Patch) -> Result<bool, Self::Error>;
    /// Fails with a not found error when there is no object with `id`.
    async fn delete(&self, id: &Self::Id) -> Result<bool, Self::Error>;
}

pub trait ContactCrud:
    Crud<
    Type = Contact,
    Id = ContactId,
    NewType = ContactContent,
    Patch = ContactPatch,
    Error = AppError,
>
{
}

pub trait DataSource: Send + Sync + 'static {
    fn contacts(&self) -> Arc<dyn ContactCrud>;
}
