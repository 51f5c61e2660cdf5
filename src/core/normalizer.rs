//! Record normalization - repairs records written by older schema versions.
//!
//! Every historical shape is enumerated once in [`Repair`] and classified by a
//! fixed priority chain. An adopted legacy `pricePerMeter` always wins over
//! recomputation, even when it disagrees with the raw quantity fields.

use crate::core::{
    calculator::{self, Measurement, UnitPrice},
    record::{Category, ProductRecord, Unit, positive},
};

/// Result of normalizing one stored record.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// All derived fields present and consistent.
    Complete(ProductRecord),
    /// No unit price could be derived. Kept, but never ranked.
    Incomplete(ProductRecord),
    /// A category that is no longer compared (e.g. `kitchen`). Always discarded.
    Dropped(ProductRecord),
}

impl Normalized {
    /// The record, unless it was dropped.
    #[must_use]
    pub fn into_kept(self) -> Option<ProductRecord> {
        match self {
            Self::Complete(record) | Self::Incomplete(record) => Some(record),
            Self::Dropped(_) => None,
        }
    }
}

/// How a record's unit price is obtained, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Repair {
    /// `pricePerUnit` is present and non-zero.
    Priced,
    /// Legacy `pricePerMeter` adopted as-is.
    PricePerMeter(f64),
    /// Recomputed from `price / totalAmount`.
    FromTotal { price: f64, total_amount: f64 },
    /// Recomputed from toilet roll fields.
    Toilet { price: f64, measurement: Measurement },
    /// Recomputed from tissue box fields; `legacy_sheets` keeps the old unit.
    Tissue {
        price: f64,
        measurement: Measurement,
        legacy_sheets: bool,
    },
    /// Nothing to derive a unit price from.
    Unrepairable,
}

fn classify(record: &ProductRecord) -> Repair {
    if positive(record.price_per_unit).is_some() {
        return Repair::Priced;
    }
    if let Some(price_per_meter) = positive(record.price_per_meter) {
        return Repair::PricePerMeter(price_per_meter);
    }
    let Some(price) = positive(Some(record.price)) else {
        return Repair::Unrepairable;
    };
    if let Some(total_amount) = positive(record.total_amount) {
        return Repair::FromTotal {
            price,
            total_amount,
        };
    }
    if let (Some(length), Some(multiplier), Some(rolls)) = (
        positive(record.length),
        positive(record.multiplier),
        positive(record.rolls),
    ) {
        return Repair::Toilet {
            price,
            measurement: Measurement::Toilet {
                length,
                multiplier,
                rolls,
            },
        };
    }
    let pairs = positive(record.pairs_per_box);
    let sheets = positive(record.sheets_per_box);
    match (pairs.or(sheets), positive(record.boxes)) {
        (Some(pairs_per_box), Some(boxes)) => Repair::Tissue {
            price,
            measurement: Measurement::Tissue {
                pairs_per_box,
                boxes,
            },
            legacy_sheets: pairs.is_none(),
        },
        _ => Repair::Unrepairable,
    }
}

fn apply(record: &mut ProductRecord, derived: UnitPrice, unit: Unit) {
    record.total_amount = Some(derived.total_amount);
    record.price_per_unit = Some(derived.price_per_unit);
    record.unit = Some(unit.as_str().to_string());
}

/// Normalizes a single record of unknown vintage.
///
/// A record without a category is treated as toilet paper, the only category of
/// the earliest storage scheme. Already-canonical records are returned unchanged.
#[must_use]
pub fn normalize(mut record: ProductRecord) -> Normalized {
    if record.category.is_none() {
        record.category = Some(Category::Toilet.as_str().to_string());
    }
    if record.category().is_none() {
        return Normalized::Dropped(record);
    }

    match classify(&record) {
        Repair::Priced => Normalized::Complete(record),
        Repair::PricePerMeter(price_per_meter) => {
            record.price_per_unit = Some(price_per_meter);
            Normalized::Complete(record)
        }
        Repair::FromTotal {
            price,
            total_amount,
        } => {
            record.price_per_unit = Some(calculator::round3(price / total_amount));
            Normalized::Complete(record)
        }
        Repair::Toilet { price, measurement } => match calculator::calculate(&measurement, price) {
            Ok(derived) => {
                apply(&mut record, derived, derived.unit);
                Normalized::Complete(record)
            }
            Err(_) => Normalized::Incomplete(record),
        },
        Repair::Tissue {
            price,
            measurement,
            legacy_sheets,
        } => match calculator::calculate(&measurement, price) {
            Ok(derived) => {
                let unit = if legacy_sheets { Unit::Sheet } else { derived.unit };
                apply(&mut record, derived, unit);
                Normalized::Complete(record)
            }
            Err(_) => Normalized::Incomplete(record),
        },
        Repair::Unrepairable => Normalized::Incomplete(record),
    }
}

/// Normalizes a batch, discarding dropped records and keeping incomplete ones.
#[must_use]
pub fn normalize_all(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    records
        .into_iter()
        .filter_map(|record| normalize(record).into_kept())
        .collect()
}
