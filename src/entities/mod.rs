//! Entity module - Contains all SeaORM entity definitions for the database.
//! `products` is the authoritative per-user store; `local_storage` and
//! `legacy_products` hold data from older versions awaiting migration.

pub mod legacy_product;
pub mod local_storage;
pub mod product;

// Re-export specific types to avoid conflicts
pub use legacy_product::{
    Column as LegacyProductColumn, Entity as LegacyProduct, Model as LegacyProductModel,
};
pub use local_storage::{
    Column as LocalStorageColumn, Entity as LocalStorage, Model as LocalStorageModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
