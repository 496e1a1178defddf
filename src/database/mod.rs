pub mod memory;
pub mod postgres;
pub mod record;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryListStore;
pub use postgres::PgListStore;
pub use record::{ListRecord, NewList};

/// Errors from a list store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("List not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Document-store operations over `List` records.
///
/// Each call is a single independent operation; implementations must not
/// rely on callers serializing access.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Persist a new list and return it with its assigned id and timestamps
    async fn create(&self, new_list: NewList) -> Result<ListRecord, StoreError>;

    /// All lists, in store-defined order
    async fn find_all(&self) -> Result<Vec<ListRecord>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ListRecord>, StoreError>;

    /// Shallow-merge `changes` into the stored attributes
    async fn update(&self, id: Uuid, changes: Map<String, Value>) -> Result<(), StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Connectivity check used by `/health`
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
