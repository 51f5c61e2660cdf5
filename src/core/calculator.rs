//! Unit price calculation.
//!
//! Pure functions deriving the total quantity and price per unit from the
//! category-specific raw fields of a purchase.

use crate::{
    core::record::{Category, Unit},
    errors::{Error, Result},
};

/// Raw quantity fields entered for one purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Toilet paper rolls
    Toilet {
        /// Meters per roll
        length: f64,
        /// Effective-length multiplier
        multiplier: f64,
        /// Number of rolls
        rolls: f64,
    },
    /// Tissue boxes
    Tissue {
        /// Pairs per box
        pairs_per_box: f64,
        /// Number of boxes
        boxes: f64,
    },
}

impl Measurement {
    /// The category this measurement belongs to.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Toilet { .. } => Category::Toilet,
            Self::Tissue { .. } => Category::Tissue,
        }
    }

    /// Product of the raw quantity fields.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        match *self {
            Self::Toilet {
                length,
                multiplier,
                rolls,
            } => length * multiplier * rolls,
            Self::Tissue {
                pairs_per_box,
                boxes,
            } => pairs_per_box * boxes,
        }
    }
}

/// Derived pricing fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPrice {
    /// Total base units bought
    pub total_amount: f64,
    /// `round3(price / total_amount)`
    pub price_per_unit: f64,
    /// Display unit
    pub unit: Unit,
}

/// Rounds to three decimal places, halves away from zero.
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Computes the unit price of a purchase.
///
/// # Errors
/// Returns [`Error::Validation`] when a toilet roll length is not positive, or
/// when the total amount is not positive.
pub fn calculate(measurement: &Measurement, price: f64) -> Result<UnitPrice> {
    let unit = match *measurement {
        Measurement::Toilet { length, .. } => {
            if length.is_nan() || length <= 0.0 {
                return Err(Error::validation("Please enter the roll length"));
            }
            Unit::Meter
        }
        Measurement::Tissue { .. } => Unit::Pair,
    };

    let total_amount = measurement.total_amount();
    if !total_amount.is_finite() || total_amount <= 0.0 {
        return Err(Error::validation("Please enter the required fields"));
    }

    Ok(UnitPrice {
        total_amount,
        price_per_unit: round3(price / total_amount),
        unit,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_toilet_unit_price() {
        let measurement = Measurement::Toilet {
            length: 30.0,
            multiplier: 2.0,
            rolls: 8.0,
        };
        let result = calculate(&measurement, 400.0).unwrap();
        assert_eq!(result.total_amount, 480.0);
        assert_eq!(result.price_per_unit, 0.833);
        assert_eq!(result.unit, Unit::Meter);
        assert_eq!(result.unit.as_str(), "m");
    }

    #[test]
    fn test_tissue_unit_price() {
        let measurement = Measurement::Tissue {
            pairs_per_box: 150.0,
            boxes: 5.0,
        };
        let result = calculate(&measurement, 300.0).unwrap();
        assert_eq!(result.total_amount, 750.0);
        assert_eq!(result.price_per_unit, 0.4);
        assert_eq!(result.unit.as_str(), "組");
    }

    #[test]
    fn test_zero_length_is_rejected_regardless_of_other_fields() {
        let measurement = Measurement::Toilet {
            length: 0.0,
            multiplier: 3.0,
            rolls: 12.0,
        };
        let result = calculate(&measurement, 500.0);
        assert!(matches!(
            result,
            Err(Error::Validation { message }) if message.contains("length")
        ));
    }

    #[test]
    fn test_zero_total_is_rejected() {
        let no_rolls = Measurement::Toilet {
            length: 30.0,
            multiplier: 1.0,
            rolls: 0.0,
        };
        assert!(matches!(
            calculate(&no_rolls, 400.0),
            Err(Error::Validation { .. })
        ));

        let no_boxes = Measurement::Tissue {
            pairs_per_box: 150.0,
            boxes: 0.0,
        };
        assert!(matches!(
            calculate(&no_boxes, 300.0),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(400.0 / 480.0), 0.833);
        assert_eq!(round3(0.4), 0.4);
        assert_eq!(round3(1.0 / 3.0), 0.333);
        assert_eq!(round3(2.0 / 3.0), 0.667);
    }
}
