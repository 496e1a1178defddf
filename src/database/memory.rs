use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::record::validate_attributes;
use super::{ListRecord, ListStore, NewList, StoreError};

/// In-process store used for development and tests. Keeps insertion order.
#[derive(Clone, Default)]
pub struct MemoryListStore {
    lists: Arc<RwLock<Vec<ListRecord>>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn create(&self, new_list: NewList) -> Result<ListRecord, StoreError> {
        let fields = validate_attributes(new_list.fields)?;
        let now = Utc::now();
        let record = ListRecord {
            id: Uuid::new_v4(),
            owner: new_list.owner,
            fields,
            created_at: now,
            updated_at: now,
        };

        self.lists.write().await.push(record.clone());
        debug!("Stored list {} in memory", record.id);
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<ListRecord>, StoreError> {
        Ok(self.lists.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ListRecord>, StoreError> {
        let lists = self.lists.read().await;
        Ok(lists.iter().find(|l| l.id == id).cloned())
    }

    async fn update(&self, id: Uuid, changes: Map<String, Value>) -> Result<(), StoreError> {
        let changes = validate_attributes(changes)?;

        let mut lists = self.lists.write().await;
        let record = lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.merge(changes);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut lists = self.lists.write().await;
        let index = lists
            .iter()
            .position(|l| l.id == id)
            .ok_or(StoreError::NotFound(id))?;
        lists.remove(index);
        Ok(())
    }
}
