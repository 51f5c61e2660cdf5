//! Legacy local sources awaiting migration.
//!
//! Two older app versions kept products locally: a flat JSON list under a single
//! key-value entry, and an embedded table holding one JSON document per row. Both
//! are read once, migrated, then cleared. An absent source reads as empty and
//! clearing it is a no-op. A single unreadable entry is skipped with a warning;
//! it never hides the rest of its source.

use crate::{
    core::record::ProductRecord,
    entities::{LegacyProduct, LocalStorage, legacy_product, local_storage},
    errors::Result,
};
use async_trait::async_trait;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::warn;

/// Default key of the flat legacy product list.
pub const DEFAULT_STORAGE_KEY: &str = "toilet-products";

/// A read-then-clear source of legacy records.
#[async_trait]
pub trait LegacySource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Reads every record the source holds.
    async fn load(&self) -> Result<Vec<ProductRecord>>;

    /// Removes everything the source holds.
    async fn clear(&self) -> Result<()>;
}

/// The flat JSON list stored under one `local_storage` key.
#[derive(Debug, Clone)]
pub struct KeyValueSource {
    db: DatabaseConnection,
    key: String,
}

impl KeyValueSource {
    /// Creates a source reading the list stored under `key`.
    #[must_use]
    pub fn new(db: DatabaseConnection, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// Writes `records` as the JSON list under this source's key, replacing any
    /// previous value.
    pub async fn write(&self, records: &[ProductRecord]) -> Result<()> {
        let value = serde_json::to_string(records)?;
        self.clear().await?;
        local_storage::ActiveModel {
            key: Set(self.key.clone()),
            value: Set(value),
            updated_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl LegacySource for KeyValueSource {
    fn name(&self) -> &str {
        &self.key
    }

    async fn load(&self) -> Result<Vec<ProductRecord>> {
        let entry = LocalStorage::find()
            .filter(local_storage::Column::Key.eq(self.key.as_str()))
            .one(&self.db)
            .await?;

        let Some(entry) = entry else {
            return Ok(Vec::new());
        };

        let items: Vec<serde_json::Value> = serde_json::from_str(&entry.value)?;
        Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping unreadable entry {} in '{}': {}", index, self.key, e);
                    None
                }
            })
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        LocalStorage::delete_many()
            .filter(local_storage::Column::Key.eq(self.key.as_str()))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

/// The embedded `legacy_products` document table.
#[derive(Debug, Clone)]
pub struct DocumentTableSource {
    db: DatabaseConnection,
}

impl DocumentTableSource {
    /// Creates a source over the `legacy_products` table.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends one record as a JSON document.
    pub async fn insert(&self, record: &ProductRecord) -> Result<()> {
        legacy_product::ActiveModel {
            document: Set(serde_json::to_string(record)?),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl LegacySource for DocumentTableSource {
    fn name(&self) -> &str {
        "legacy_products"
    }

    async fn load(&self) -> Result<Vec<ProductRecord>> {
        let rows = LegacyProduct::find()
            .order_by_asc(legacy_product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_str(&row.document) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping unreadable legacy document {}: {}", row.id, e);
                    None
                }
            })
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        LegacyProduct::delete_many().exec(&self.db).await?;
        Ok(())
    }
}
