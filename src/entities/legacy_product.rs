//! Legacy product entity - The embedded object-database table of the offline app.
//! Each row holds one product document as JSON, in whatever shape it was saved.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Legacy product document
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "legacy_products")]
pub struct Model {
    /// Row identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// JSON-encoded product document
    #[sea_orm(column_type = "Text")]
    pub document: String,
}

/// Legacy documents have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
