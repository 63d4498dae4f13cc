//! Product entity - Represents an orderable catalog item.
//!
//! Each product carries the label of its fractional unit (for example "KG" or
//! "UN") alongside the implicit whole-box unit, an optional internal code used
//! to match cost updates coming from the inventory system, and the latest
//! synced cost. Which weekdays a product can be ordered on is modeled by the
//! `product_availability` relation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique across the catalog (order lines reference it)
    #[sea_orm(unique)]
    pub name: String,
    /// Label of the fractional unit (e.g. "KG", "UN")
    pub fractional_unit: String,
    /// Code in the external inventory system, used by the cost sync
    #[sea_orm(unique)]
    pub internal_code: Option<String>,
    /// Unit cost, updated by the cost sync; 0.0 until first synced
    pub cost: f64,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product is available on zero or more ordering weekdays
    #[sea_orm(has_many = "super::product_availability::Entity")]
    Availability,
}

impl Related<super::product_availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Availability.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
