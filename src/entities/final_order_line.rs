//! Final order line entity - The administrator's curated quantity overlay.
//!
//! One row per (date, product, store) the administrator has decided on,
//! independent of what the stores submitted. No row means "not yet decided",
//! which the report must render as blank rather than zero.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Curated final order line database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "final_order_lines")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Day the final order is for
    pub order_date: Date,
    /// Product name
    pub product: String,
    /// Receiving store
    pub store: String,
    /// Quantity the administrator settled on (zero is a deliberate decision)
    pub quantity: i64,
}

/// Defines relationships between `FinalOrderLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
