use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use super::record::validate_attributes;
use super::{ListRecord, ListStore, NewList, StoreError};
use crate::config::DatabaseConfig;

/// Embedded migrations for the `lists` table
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const SELECT_COLUMNS: &str = "id, owner, fields, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ListRow {
    id: Uuid,
    owner: Uuid,
    fields: Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ListRow> for ListRecord {
    type Error = StoreError;

    fn try_from(row: ListRow) -> Result<Self, Self::Error> {
        let fields = match row.fields.0 {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::Corrupt(format!(
                    "list {} has non-object fields: {}",
                    row.id, other
                )))
            }
        };

        Ok(ListRecord {
            id: row.id,
            owner: row.owner,
            fields,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres-backed store keeping list attributes in a JSONB document column
#[derive(Clone)]
pub struct PgListStore {
    pool: PgPool,
}

impl PgListStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration and apply embedded migrations
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("DATABASE_URL is not set".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        MIGRATOR.run(&pool).await?;

        info!("Connected list store to Postgres (max {} connections)", config.max_connections);
        Ok(Self::new(pool))
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed list store pool");
    }
}

#[async_trait]
impl ListStore for PgListStore {
    async fn create(&self, new_list: NewList) -> Result<ListRecord, StoreError> {
        let fields = validate_attributes(new_list.fields)?;

        let sql = format!(
            "INSERT INTO lists (id, owner, fields) VALUES ($1, $2, $3) RETURNING {}",
            SELECT_COLUMNS
        );
        let row: ListRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(new_list.owner)
            .bind(Json(Value::Object(fields)))
            .fetch_one(&self.pool)
            .await?;

        debug!("Inserted list {}", row.id);
        row.try_into()
    }

    async fn find_all(&self) -> Result<Vec<ListRecord>, StoreError> {
        let sql = format!("SELECT {} FROM lists", SELECT_COLUMNS);
        let rows: Vec<ListRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(ListRecord::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ListRecord>, StoreError> {
        let sql = format!("SELECT {} FROM lists WHERE id = $1", SELECT_COLUMNS);
        let row: Option<ListRow> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;

        row.map(ListRecord::try_from).transpose()
    }

    async fn update(&self, id: Uuid, changes: Map<String, Value>) -> Result<(), StoreError> {
        let changes = validate_attributes(changes)?;
        if changes.is_empty() {
            // Still report missing records
            return match self.find_by_id(id).await? {
                Some(_) => Ok(()),
                None => Err(StoreError::NotFound(id)),
            };
        }

        let result = sqlx::query(
            "UPDATE lists SET fields = fields || $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(Json(Value::Object(changes)))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
