//! Ranking of one category by unit price.
//!
//! Records are ordered ascending by unit price with a stable sort, so ties keep
//! their insertion order. Records without a unit price are not ranked; they are
//! returned separately so the caller can still list them.

use crate::core::record::{Category, ProductRecord};

/// Badge shown next to a ranked product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    /// Rank 1
    Cheapest,
    /// Rank 2
    Second,
    /// Rank 3
    Third,
    /// Rank 4 and below
    Plain,
}

impl Badge {
    /// Badge for a 1-based rank.
    #[must_use]
    pub const fn for_rank(rank: usize) -> Self {
        match rank {
            1 => Self::Cheapest,
            2 => Self::Second,
            3 => Self::Third,
            _ => Self::Plain,
        }
    }

    /// Label text for a 1-based rank.
    #[must_use]
    pub fn label(self, rank: usize) -> String {
        match self {
            Self::Cheapest => "🏆 Cheapest".to_string(),
            Self::Second => "🥈 2nd".to_string(),
            Self::Third => "🥉 3rd".to_string(),
            Self::Plain => ordinal(rank),
        }
    }
}

/// English ordinal for a positive integer (`4th`, `11th`, `22nd`).
#[must_use]
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// One ranked product.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedProduct<'a> {
    /// 1-based position
    pub rank: usize,
    /// Badge for the position
    pub badge: Badge,
    /// The sort key that placed it here
    pub unit_price: f64,
    /// The ranked record
    pub product: &'a ProductRecord,
}

/// Ranked view of one category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ranking<'a> {
    /// Products with a unit price, cheapest first
    pub entries: Vec<RankedProduct<'a>>,
    /// Products of the category that could not be priced, in insertion order
    pub incomplete: Vec<&'a ProductRecord>,
}

impl Ranking<'_> {
    /// Total number of records in the category.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() + self.incomplete.len()
    }

    /// Whether the category has no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.incomplete.is_empty()
    }
}

/// Ranks the records of `category`.
#[must_use]
pub fn rank(products: &[ProductRecord], category: Category) -> Ranking<'_> {
    let mut priced = Vec::new();
    let mut incomplete = Vec::new();

    for product in products.iter().filter(|p| p.is_in(category)) {
        match product.unit_price() {
            Ok(unit_price) => priced.push((unit_price, product)),
            Err(_) => incomplete.push(product),
        }
    }

    priced.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    let entries = priced
        .into_iter()
        .enumerate()
        .map(|(index, (unit_price, product))| {
            let rank = index + 1;
            RankedProduct {
                rank,
                badge: Badge::for_rank(rank),
                unit_price,
                product,
            }
        })
        .collect();

    Ranking {
        entries,
        incomplete,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn priced(name: &str, category: Category, price_per_unit: f64) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            category: Some(category.as_str().to_string()),
            price_per_unit: Some(price_per_unit),
            ..Default::default()
        }
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let products = vec![
            priced("expensive", Category::Toilet, 0.9),
            priced("A", Category::Toilet, 0.5),
            priced("B", Category::Toilet, 0.5),
        ];
        let ranking = rank(&products, Category::Toilet);
        let names: Vec<&str> = ranking
            .entries
            .iter()
            .map(|e| e.product.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "expensive"]);
        assert_eq!(ranking.entries[0].rank, 1);
        assert_eq!(ranking.entries[0].badge, Badge::Cheapest);
        assert_eq!(ranking.entries[1].rank, 2);
        assert_eq!(ranking.entries[1].badge, Badge::Second);
        assert_eq!(ranking.entries[2].badge, Badge::Third);
    }

    #[test]
    fn test_filters_by_category() {
        let products = vec![
            priced("roll", Category::Toilet, 0.8),
            priced("box", Category::Tissue, 0.4),
        ];
        let ranking = rank(&products, Category::Tissue);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.entries[0].product.name, "box");
        assert_eq!(ranking.entries[0].unit_price, 0.4);
    }

    #[test]
    fn test_legacy_price_per_meter_is_used_as_key() {
        let legacy = ProductRecord {
            name: "legacy".to_string(),
            category: Some("toilet".to_string()),
            price_per_meter: Some(0.3),
            ..Default::default()
        };
        let products = vec![priced("new", Category::Toilet, 0.5), legacy];
        let ranking = rank(&products, Category::Toilet);
        assert_eq!(ranking.entries[0].product.name, "legacy");
    }

    #[test]
    fn test_incomplete_records_are_not_ranked() {
        let unpriced = ProductRecord {
            name: "unpriced".to_string(),
            category: Some("toilet".to_string()),
            ..Default::default()
        };
        let zero = priced("zero", Category::Toilet, 0.0);
        let products = vec![unpriced, priced("priced", Category::Toilet, 0.7), zero];
        let ranking = rank(&products, Category::Toilet);
        assert_eq!(ranking.entries.len(), 1);
        assert_eq!(ranking.entries[0].product.name, "priced");
        let incomplete: Vec<&str> = ranking.incomplete.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(incomplete, vec!["unpriced", "zero"]);
        assert_eq!(ranking.len(), 3);
    }

    #[test]
    fn test_badge_labels() {
        assert_eq!(Badge::for_rank(1).label(1), "🏆 Cheapest");
        assert_eq!(Badge::for_rank(3).label(3), "🥉 3rd");
        assert_eq!(Badge::for_rank(4).label(4), "4th");
        assert_eq!(Badge::for_rank(11).label(11), "11th");
        assert_eq!(Badge::for_rank(22).label(22), "22nd");
        assert_eq!(Badge::for_rank(101).label(101), "101st");
    }

    #[test]
    fn test_empty_category() {
        let ranking = rank(&[], Category::Toilet);
        assert!(ranking.is_empty());
    }
}
