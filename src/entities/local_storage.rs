//! Local storage entity - Key-value pairs left behind by the browser-era app.
//!
//! The only key read today is the flat JSON product list (`toilet-products` by
//! default), which is migrated once and then removed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Local storage model - one key with its raw string value
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "local_storage")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"toilet-products"`)
    pub key: String,
    /// Stored value, JSON for the product list
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `LocalStorage` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
