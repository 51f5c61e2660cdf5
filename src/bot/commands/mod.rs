//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

use crate::core::record::Category;

/// General utility commands
pub mod general;

/// Legacy data migration command
pub mod migrate;

/// Product recording, ranking and management commands
pub mod product;

// Export commands
pub use general::*;
pub use migrate::*;
pub use product::*;

/// Category picker shown as a slash command choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum CategoryChoice {
    /// Toilet paper
    #[name = "Toilet paper"]
    Toilet,
    /// Tissue
    #[name = "Tissue"]
    Tissue,
}

impl From<CategoryChoice> for Category {
    fn from(choice: CategoryChoice) -> Self {
        match choice {
            CategoryChoice::Toilet => Self::Toilet,
            CategoryChoice::Tissue => Self::Tissue,
        }
    }
}
