//! Per-user application state and the actions a user can take.
//!
//! A [`Session`] owns the in-memory working set, the active category and the
//! user's store. Every mutating action reports to the user through a
//! [`Notifier`] and returns control normally: input and save problems are shown
//! as messages, and only notifier failures come back as errors.

use crate::{
    core::{
        calculator::{self, Measurement},
        legacy::LegacySource,
        migration::{self, MigrationOutcome},
        normalizer,
        notify::Notifier,
        ranking::{self, Ranking},
        record::{Category, ProductRecord},
        store::ProductStore,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use tracing::{debug, error, info};

/// A new purchase as entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    /// Product name
    pub name: String,
    /// Store name, may be empty
    pub store: String,
    /// Total price paid
    pub price: f64,
    /// Free-form note
    pub memo: String,
    /// Category-specific quantity fields
    pub measurement: Measurement,
}

impl ProductDraft {
    /// Validates the draft and builds a canonical record from it.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for a blank name, a non-positive price, or
    /// quantities the calculator rejects.
    pub fn into_record(self) -> Result<ProductRecord> {
        let name = self.name.trim().to_string();
        if name.is_empty() || !self.price.is_finite() || self.price <= 0.0 {
            return Err(Error::validation("Please enter a product name and price"));
        }

        let derived = calculator::calculate(&self.measurement, self.price)?;

        let mut record = ProductRecord {
            name,
            store: self.store.trim().to_string(),
            price: self.price,
            memo: self.memo.trim().to_string(),
            category: Some(self.measurement.category().as_str().to_string()),
            total_amount: Some(derived.total_amount),
            price_per_unit: Some(derived.price_per_unit),
            unit: Some(derived.unit.as_str().to_string()),
            ..Default::default()
        };
        match self.measurement {
            Measurement::Toilet {
                length,
                multiplier,
                rolls,
            } => {
                record.length = Some(length);
                record.multiplier = Some(multiplier);
                record.rolls = Some(rolls);
            }
            Measurement::Tissue {
                pairs_per_box,
                boxes,
            } => {
                record.pairs_per_box = Some(pairs_per_box);
                record.boxes = Some(boxes);
            }
        }
        Ok(record)
    }
}

/// Changes to an existing record; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductEdit {
    /// New name
    pub name: Option<String>,
    /// New store
    pub store: Option<String>,
    /// New price
    pub price: Option<f64>,
    /// New memo
    pub memo: Option<String>,
    /// New roll length (toilet)
    pub length: Option<f64>,
    /// New multiplier (toilet)
    pub multiplier: Option<f64>,
    /// New roll count (toilet)
    pub rolls: Option<f64>,
    /// New pairs per box (tissue)
    pub pairs_per_box: Option<f64>,
    /// New box count (tissue)
    pub boxes: Option<f64>,
}

impl ProductEdit {
    /// Merges the edit onto `existing`, producing a draft in the record's category.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when the existing record has no usable category.
    pub fn merge(&self, existing: &ProductRecord) -> Result<ProductDraft> {
        let measurement = match existing.category() {
            Some(Category::Toilet) => Measurement::Toilet {
                length: self.length.or(existing.length).unwrap_or(0.0),
                multiplier: self.multiplier.or(existing.multiplier).unwrap_or(1.0),
                rolls: self.rolls.or(existing.rolls).unwrap_or(0.0),
            },
            Some(Category::Tissue) => Measurement::Tissue {
                pairs_per_box: self
                    .pairs_per_box
                    .or(existing.pairs_per_box)
                    .or(existing.sheets_per_box)
                    .unwrap_or(0.0),
                boxes: self.boxes.or(existing.boxes).unwrap_or(0.0),
            },
            None => return Err(Error::validation("This product has no category")),
        };

        Ok(ProductDraft {
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            store: self.store.clone().unwrap_or_else(|| existing.store.clone()),
            price: self.price.unwrap_or(existing.price),
            memo: self.memo.clone().unwrap_or_else(|| existing.memo.clone()),
            measurement,
        })
    }
}

/// One user's working state.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    products: Vec<ProductRecord>,
    category: Category,
}

impl<S: ProductStore> Session<S> {
    /// Loads and normalizes everything in `store`.
    ///
    /// # Errors
    /// Returns the store's error when loading fails.
    pub async fn open(store: S, category: Category) -> Result<Self> {
        let loaded = store.load_all().await?;
        let total = loaded.len();
        let products = normalizer::normalize_all(loaded);
        debug!(
            "Session opened with {} records ({} dropped)",
            products.len(),
            total - products.len()
        );
        Ok(Self {
            store,
            products,
            category,
        })
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Every record in the working set, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// The category currently being compared.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Switches the category being compared.
    pub const fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == Some(id))
    }

    /// Ranking of the active category.
    #[must_use]
    pub fn ranking(&self) -> Ranking<'_> {
        ranking::rank(&self.products, self.category)
    }

    /// Distinct, non-blank store names containing `partial` (case-insensitive),
    /// in the order they were first used.
    #[must_use]
    pub fn store_suggestions(&self, partial: &str) -> Vec<String> {
        let partial = partial.to_lowercase();
        let mut stores: Vec<String> = Vec::new();
        for product in &self.products {
            let store = product.store.trim();
            if store.is_empty() || stores.iter().any(|s| s == store) {
                continue;
            }
            if store.to_lowercase().contains(&partial) {
                stores.push(store.to_string());
            }
        }
        stores
    }

    /// Validates, prices and saves a new purchase. Returns the new id, or `None`
    /// when nothing was saved.
    pub async fn add_product<N: Notifier + ?Sized>(
        &mut self,
        draft: ProductDraft,
        notifier: &N,
    ) -> Result<Option<i64>> {
        let mut record = match draft.into_record() {
            Ok(record) => record,
            Err(e) => {
                notifier.toast(&e.to_string()).await?;
                return Ok(None);
            }
        };
        record.registered_at = Some(Utc::now());

        match self.store.save(&record).await {
            Ok(id) => {
                record.id = Some(id);
                info!("Added product {} ({})", id, record.name);
                self.products.push(record);
                notifier.toast("Added ✓").await?;
                Ok(Some(id))
            }
            Err(e) => {
                error!("Failed to save product '{}': {}", record.name, e);
                notifier.toast("Failed to save").await?;
                Ok(None)
            }
        }
    }

    /// Applies an edit, re-running the calculator. Returns whether anything changed.
    pub async fn edit_product<N: Notifier + ?Sized>(
        &mut self,
        id: i64,
        edit: &ProductEdit,
        notifier: &N,
    ) -> Result<bool> {
        let Some(index) = self.products.iter().position(|p| p.id == Some(id)) else {
            notifier.toast("Product not found").await?;
            return Ok(false);
        };

        let existing = &self.products[index];
        let record = match edit.merge(existing).and_then(ProductDraft::into_record) {
            Ok(record) => ProductRecord {
                id: Some(id),
                registered_at: existing.registered_at,
                ..record
            },
            Err(e) => {
                notifier.toast(&e.to_string()).await?;
                return Ok(false);
            }
        };

        if let Err(e) = self.store.update(id, &record).await {
            error!("Failed to update product {}: {}", id, e);
            notifier.toast("Failed to update").await?;
            return Ok(false);
        }

        self.products[index] = record;
        notifier.toast("Updated ✓").await?;
        Ok(true)
    }

    /// Deletes one record after confirmation. Returns whether it was deleted.
    pub async fn delete_product<N: Notifier + ?Sized>(
        &mut self,
        id: i64,
        notifier: &N,
    ) -> Result<bool> {
        let Some(product) = self.find(id) else {
            notifier.toast("Product not found").await?;
            return Ok(false);
        };

        if !notifier
            .confirm(&format!("Delete '{}'?", product.name))
            .await?
        {
            return Ok(false);
        }

        if let Err(e) = self.store.delete(id).await {
            error!("Failed to delete product {}: {}", id, e);
            notifier.toast("Failed to delete").await?;
            return Ok(false);
        }

        self.products.retain(|p| p.id != Some(id));
        notifier.toast("Deleted").await?;
        Ok(true)
    }

    /// Deletes every record of the active category after confirmation. Returns
    /// how many records were removed from the working set.
    pub async fn clear_category<N: Notifier + ?Sized>(&mut self, notifier: &N) -> Result<usize> {
        let category = self.category;
        let count = self.products.iter().filter(|p| p.is_in(category)).count();
        if count == 0 {
            notifier.toast("No products to delete").await?;
            return Ok(0);
        }

        if !notifier
            .confirm(&format!(
                "Delete all {count} {} products?",
                category.display_name()
            ))
            .await?
        {
            return Ok(0);
        }

        if let Err(e) = self.store.delete_by_category(category).await {
            error!("Failed to clear {}: {}", category, e);
            notifier.toast("Failed to delete").await?;
            return Ok(0);
        }

        self.products.retain(|p| !p.is_in(category));
        notifier.toast("Deleted").await?;
        Ok(count)
    }

    /// Runs the legacy migration into this session's store and working set.
    pub async fn migrate_legacy<N: Notifier + ?Sized>(
        &mut self,
        sources: &[&dyn LegacySource],
        notifier: &N,
    ) -> Result<MigrationOutcome> {
        migration::migrate(&self.store, &mut self.products, sources, notifier).await
    }
}

/// Number of legacy records waiting in `sources`.
pub async fn legacy_pending(sources: &[&dyn LegacySource]) -> usize {
    migration::gather(sources).await.records.len()
}
