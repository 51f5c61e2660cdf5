//! Shared test utilities for `PriceBuddy`.
//!
//! This module provides common helper functions for setting up test databases,
//! building records with sensible defaults, and scripted stand-ins for the
//! notifier and the store.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        calculator::round3,
        notify::Notifier,
        record::{Category, ProductRecord},
        store::ProductStore,
    },
    entities::{local_storage, product},
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Fixed registration time with whole seconds, so it survives a database round trip.
pub fn test_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Creates a canonical toilet paper record.
///
/// # Defaults
/// * 30m rolls, double length, 8 rolls (480m total)
/// * `store`: `"Drugstore"`
/// * `memo`: `"test"`
pub fn toilet_record(name: &str, price: f64) -> ProductRecord {
    ProductRecord {
        name: name.to_string(),
        store: "Drugstore".to_string(),
        price,
        memo: "test".to_string(),
        category: Some(Category::Toilet.as_str().to_string()),
        registered_at: Some(test_timestamp()),
        length: Some(30.0),
        multiplier: Some(2.0),
        rolls: Some(8.0),
        total_amount: Some(480.0),
        price_per_unit: Some(round3(price / 480.0)),
        unit: Some("m".to_string()),
        ..Default::default()
    }
}

/// Creates a canonical tissue record.
///
/// # Defaults
/// * 150 pairs per box, 5 boxes (750 pairs total)
/// * `store`: `"Supermarket"`
pub fn tissue_record(name: &str, price: f64) -> ProductRecord {
    ProductRecord {
        name: name.to_string(),
        store: "Supermarket".to_string(),
        price,
        memo: "test".to_string(),
        category: Some(Category::Tissue.as_str().to_string()),
        registered_at: Some(test_timestamp()),
        pairs_per_box: Some(150.0),
        boxes: Some(5.0),
        total_amount: Some(750.0),
        price_per_unit: Some(round3(price / 750.0)),
        unit: Some("組".to_string()),
        ..Default::default()
    }
}

/// A bare `products` row the way an older schema would have written it: no
/// quantities, no derived fields and no registration time. Set extra fields on
/// the returned model before inserting.
pub fn raw_row(user_id: &str, name: &str, category: &str, price: f64) -> product::ActiveModel {
    product::ActiveModel {
        user_id: Set(user_id.to_string()),
        name: Set(name.to_string()),
        store: Set(String::new()),
        price: Set(price),
        memo: Set(String::new()),
        category: Set(category.to_string()),
        registered_at: Set(None),
        length: Set(None),
        multiplier: Set(None),
        rolls: Set(None),
        pairs_per_box: Set(None),
        sheets_per_box: Set(None),
        boxes: Set(None),
        total_amount: Set(None),
        price_per_unit: Set(None),
        price_per_meter: Set(None),
        unit: Set(None),
        ..Default::default()
    }
}

/// Writes a raw value under a `local_storage` key.
pub async fn seed_local_storage(db: &DatabaseConnection, key: &str, value: &str) -> Result<()> {
    local_storage::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        updated_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Notifier that answers confirmations from a script and records everything shown.
///
/// Once the script runs out, every further confirmation is declined.
#[derive(Debug, Default)]
pub struct ScriptedNotifier {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
    toasts: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl ScriptedNotifier {
    /// Creates a notifier that answers confirmations in order.
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            ..Default::default()
        }
    }

    /// Every confirmation message asked so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Every toast shown so far.
    pub fn toasts(&self) -> Vec<String> {
        self.toasts.lock().unwrap().clone()
    }

    /// Every alert shown so far.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for ScriptedNotifier {
    async fn toast(&self, message: &str) -> Result<()> {
        self.toasts.lock().unwrap().push(message.to_string());
        Ok(())
    }

    async fn confirm(&self, message: &str) -> Result<bool> {
        self.prompts.lock().unwrap().push(message.to_string());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }

    async fn alert(&self, message: &str) -> Result<()> {
        self.alerts.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// Store wrapper whose Nth save (1-based) fails with a database error.
/// Every other call goes to the wrapped store.
#[derive(Debug)]
pub struct FailingStore<S> {
    inner: S,
    fail_on: usize,
    saves: AtomicUsize,
}

impl<S> FailingStore<S> {
    /// Wraps `inner`, failing its `fail_on`-th save.
    pub const fn new(inner: S, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            saves: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl<S: ProductStore> ProductStore for FailingStore<S> {
    async fn load_all(&self) -> Result<Vec<ProductRecord>> {
        self.inner.load_all().await
    }

    async fn save(&self, record: &ProductRecord) -> Result<i64> {
        let attempt = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(Error::Database(DbErr::Custom("disk full".to_string())));
        }
        self.inner.save(record).await
    }

    async fn update(&self, id: i64, record: &ProductRecord) -> Result<()> {
        self.inner.update(id, record).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner.delete(id).await
    }

    async fn delete_by_category(&self, category: Category) -> Result<u64> {
        self.inner.delete_by_category(category).await
    }
}
