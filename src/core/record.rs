//! The product record shared by every storage scheme.
//!
//! `ProductRecord` is deliberately an optional-field type: the same struct holds
//! canonical rows from the database and partially-filled documents from older
//! storage schemes. The normalizer decides which shape a record has.

use crate::{
    entities::product,
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Product categories that can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Toilet paper, compared per meter
    Toilet,
    /// Tissue boxes, compared per pair
    Tissue,
}

impl Category {
    /// The stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Toilet => "toilet",
            Self::Tissue => "tissue",
        }
    }

    /// Human-readable name for messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Toilet => "Toilet paper",
            Self::Tissue => "Tissue",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "toilet" => Ok(Self::Toilet),
            "tissue" => Ok(Self::Tissue),
            other => Err(Error::validation(format!("Unknown category '{other}'"))),
        }
    }
}

/// Display unit of the normalized quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Meters of toilet paper
    Meter,
    /// Pairs of tissue
    Pair,
    /// Sheets of tissue, used by legacy records only
    Sheet,
}

impl Unit {
    /// The stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meter => "m",
            Self::Pair => "組",
            Self::Sheet => "枚",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product entry in any of its historical shapes.
///
/// Serializes with camelCase keys and omits absent fields entirely, which is the
/// format both legacy sources use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Store-assigned identifier; never part of the serialized payload
    #[serde(skip)]
    pub id: Option<i64>,
    /// Product name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Store name, may be empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub store: String,
    /// Total price paid; zero when unknown
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    /// Free-form note
    #[serde(default, deserialize_with = "null_as_default")]
    pub memo: String,
    /// Raw category string; `kitchen` shows up in old data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
    /// Meters per roll
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Effective-length multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    /// Roll count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolls: Option<f64>,
    /// Pairs per box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairs_per_box: Option<f64>,
    /// Sheets per box (legacy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheets_per_box: Option<f64>,
    /// Box count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxes: Option<f64>,
    /// Total base units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    /// Price per base unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<f64>,
    /// Legacy name of `price_per_unit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_meter: Option<f64>,
    /// Display unit string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Old writers stored `null` for blank text and unknown prices.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProductRecord {
    /// Parsed category, `None` when absent or not one of the compared categories.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }

    /// Whether this record belongs to `category`.
    #[must_use]
    pub fn is_in(&self, category: Category) -> bool {
        self.category.as_deref() == Some(category.as_str())
    }

    /// The ranking key: `price_per_unit`, falling back to the legacy `price_per_meter`.
    ///
    /// # Errors
    /// Returns [`Error::IncompleteRecord`] when neither field holds a positive value.
    pub fn unit_price(&self) -> Result<f64> {
        positive(self.price_per_unit)
            .or_else(|| positive(self.price_per_meter))
            .ok_or_else(|| Error::IncompleteRecord {
                name: self.name.clone(),
            })
    }

    /// The `(name, price, category)` key used to spot duplicates during migration.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn same_purchase(&self, other: &Self) -> bool {
        self.name == other.name && self.price == other.price && self.category == other.category
    }

    /// Converts into an active model for insert or full-replace update.
    ///
    /// The id is left `NotSet`; callers that update set it themselves.
    #[must_use]
    pub fn to_active_model(&self, user_id: &str) -> product::ActiveModel {
        use sea_orm::Set;

        product::ActiveModel {
            user_id: Set(user_id.to_string()),
            name: Set(self.name.clone()),
            store: Set(self.store.clone()),
            price: Set(self.price),
            memo: Set(self.memo.clone()),
            category: Set(self
                .category
                .clone()
                .unwrap_or_else(|| Category::Toilet.as_str().to_string())),
            registered_at: Set(self.registered_at),
            length: Set(self.length),
            multiplier: Set(self.multiplier),
            rolls: Set(self.rolls),
            pairs_per_box: Set(self.pairs_per_box),
            sheets_per_box: Set(self.sheets_per_box),
            boxes: Set(self.boxes),
            total_amount: Set(self.total_amount),
            price_per_unit: Set(self.price_per_unit),
            price_per_meter: Set(self.price_per_meter),
            unit: Set(self.unit.clone()),
            ..Default::default()
        }
    }
}

impl From<product::Model> for ProductRecord {
    fn from(model: product::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            store: model.store,
            price: model.price,
            memo: model.memo,
            category: Some(model.category),
            registered_at: model.registered_at,
            length: model.length,
            multiplier: model.multiplier,
            rolls: model.rolls,
            pairs_per_box: model.pairs_per_box,
            sheets_per_box: model.sheets_per_box,
            boxes: model.boxes,
            total_amount: model.total_amount,
            price_per_unit: model.price_per_unit,
            price_per_meter: model.price_per_meter,
            unit: model.unit,
        }
    }
}

/// `Some(v)` only for strictly positive, finite values; zero counts as missing.
pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
