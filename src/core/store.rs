//! Authoritative product storage.
//!
//! [`ProductStore`] is the narrow persistence interface the rest of the core talks
//! to. [`DbProductStore`] implements it over the `products` table, scoped to one
//! user.

use crate::{
    core::record::{Category, ProductRecord},
    entities::{Product, product},
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::{QueryOrder, prelude::*};

/// Per-user persistence of product records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Loads every stored record in insertion order. Records may be legacy-shaped.
    async fn load_all(&self) -> Result<Vec<ProductRecord>>;

    /// Saves a new record and returns the assigned id. The record's own id is ignored.
    async fn save(&self, record: &ProductRecord) -> Result<i64>;

    /// Replaces every field of the record with the given id.
    async fn update(&self, id: i64, record: &ProductRecord) -> Result<()>;

    /// Deletes one record. Deleting an absent id is not an error.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Deletes every record of a category and returns how many were removed.
    async fn delete_by_category(&self, category: Category) -> Result<u64>;
}

/// [`ProductStore`] backed by the `products` table.
#[derive(Debug, Clone)]
pub struct DbProductStore {
    db: DatabaseConnection,
    user_id: String,
}

impl DbProductStore {
    /// Creates a store for one user's records.
    #[must_use]
    pub fn new(db: DatabaseConnection, user_id: impl Into<String>) -> Self {
        Self {
            db,
            user_id: user_id.into(),
        }
    }

    /// The user this store is scoped to.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[async_trait]
impl ProductStore for DbProductStore {
    async fn load_all(&self) -> Result<Vec<ProductRecord>> {
        let models = Product::find()
            .filter(product::Column::UserId.eq(self.user_id.as_str()))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(ProductRecord::from).collect())
    }

    async fn save(&self, record: &ProductRecord) -> Result<i64> {
        let inserted = record.to_active_model(&self.user_id).insert(&self.db).await?;
        Ok(inserted.id)
    }

    async fn update(&self, id: i64, record: &ProductRecord) -> Result<()> {
        let result = Product::update_many()
            .set(record.to_active_model(&self.user_id))
            .filter(product::Column::Id.eq(id))
            .filter(product::Column::UserId.eq(self.user_id.as_str()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::ProductNotFound { id });
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Product::delete_many()
            .filter(product::Column::Id.eq(id))
            .filter(product::Column::UserId.eq(self.user_id.as_str()))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn delete_by_category(&self, category: Category) -> Result<u64> {
        let result = Product::delete_many()
            .filter(product::Column::Category.eq(category.as_str()))
            .filter(product::Column::UserId.eq(self.user_id.as_str()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_save_and_load_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let store = DbProductStore::new(db, "user1");

        let record = toilet_record("Double Roll", 400.0);
        let id = store.save(&record).await?;

        let loaded = store.load_all().await?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, Some(id));
        assert_eq!(loaded[0].name, "Double Roll");
        assert_eq!(loaded[0].price_per_unit, Some(0.833));
        assert_eq!(loaded[0].unit.as_deref(), Some("m"));
        assert_eq!(loaded[0].registered_at, record.registered_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_records_are_scoped_by_user() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = DbProductStore::new(db.clone(), "alice");
        let bob = DbProductStore::new(db, "bob");

        alice.save(&toilet_record("Alice Roll", 400.0)).await?;
        let bob_id = bob.save(&tissue_record("Bob Box", 300.0)).await?;

        assert_eq!(alice.load_all().await?.len(), 1);
        assert_eq!(bob.load_all().await?.len(), 1);

        // Alice cannot delete Bob's record
        alice.delete(bob_id).await?;
        assert_eq!(bob.load_all().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_replaces_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let store = DbProductStore::new(db, "user1");

        let id = store.save(&toilet_record("Before", 400.0)).await?;
        let replacement = ProductRecord {
            store: String::new(),
            memo: String::new(),
            ..tissue_record("After", 300.0)
        };
        store.update(id, &replacement).await?;

        let loaded = store.load_all().await?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, Some(id));
        assert_eq!(loaded[0].name, "After");
        assert_eq!(loaded[0].category.as_deref(), Some("tissue"));
        assert!(loaded[0].length.is_none());
        assert_eq!(loaded[0].pairs_per_box, Some(150.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let store = DbProductStore::new(db, "user1");

        let result = store.update(999, &toilet_record("Ghost", 100.0)).await;
        assert!(matches!(result, Err(Error::ProductNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let store = DbProductStore::new(db, "user1");

        let id = store.save(&toilet_record("Roll", 400.0)).await?;
        store.delete(id).await?;
        store.delete(id).await?;
        assert!(store.load_all().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_by_category() -> Result<()> {
        let db = setup_test_db().await?;
        let store = DbProductStore::new(db, "user1");

        store.save(&toilet_record("Roll A", 400.0)).await?;
        store.save(&toilet_record("Roll B", 500.0)).await?;
        store.save(&tissue_record("Box", 300.0)).await?;

        assert_eq!(store.delete_by_category(Category::Toilet).await?, 2);
        assert_eq!(store.delete_by_category(Category::Toilet).await?, 0);

        let remaining = store.load_all().await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Box");

        Ok(())
    }

    #[tokio::test]
    async fn test_load_returns_legacy_shaped_rows() -> Result<()> {
        let db = setup_test_db().await?;
        raw_row("user1", "Old Roll", "toilet", 400.0)
            .insert(&db)
            .await?;

        let store = DbProductStore::new(db, "user1");
        let loaded = store.load_all().await?;
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].price_per_unit.is_none());
        assert!(loaded[0].registered_at.is_none());

        Ok(())
    }
}
