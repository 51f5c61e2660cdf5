//! Product entity - One recorded purchase of a household staple.
//!
//! Rows are scoped by `user_id`. Category-specific quantity fields and the derived
//! pricing fields are nullable because rows may have been written by older schema
//! versions; the normalizer repairs them on load.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier assigned on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID that owns this record
    pub user_id: String,
    /// Product name (e.g., "Scottie 2x Long")
    pub name: String,
    /// Where it was bought, may be empty
    pub store: String,
    /// Total price paid
    pub price: f64,
    /// Free-form note, may be empty
    pub memo: String,
    /// `"toilet"` or `"tissue"`
    pub category: String,
    /// When the purchase was recorded, absent on legacy rows
    pub registered_at: Option<DateTimeUtc>,
    /// Meters per roll
    pub length: Option<f64>,
    /// Effective-length multiplier (e.g. 2.0 for double-length rolls)
    pub multiplier: Option<f64>,
    /// Roll count
    pub rolls: Option<f64>,
    /// Pairs per tissue box
    pub pairs_per_box: Option<f64>,
    /// Legacy sheets per tissue box
    pub sheets_per_box: Option<f64>,
    /// Box count
    pub boxes: Option<f64>,
    /// Total base units (meters or pairs)
    pub total_amount: Option<f64>,
    /// Price per base unit, rounded to 3 decimals
    pub price_per_unit: Option<f64>,
    /// Legacy name of `price_per_unit`
    pub price_per_meter: Option<f64>,
    /// Display unit: `"m"`, `"組"` or legacy `"枚"`
    pub unit: Option<String>,
}

/// Products have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
