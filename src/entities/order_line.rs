//! Order line entity - One raw submitted quantity for a product and store.
//!
//! A store's submission for a day is the set of its lines for that date;
//! resubmitting replaces the whole set. `unit_kind` is either the literal
//! "Box" or the product's fractional unit label, so a store can order both
//! whole boxes and a fractional amount of the same product on the same day.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw order line database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_lines")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Day the order is for
    pub order_date: Date,
    /// Submitting store
    pub store: String,
    /// Product name as listed in the day's catalog
    pub product: String,
    /// "Box" or the product's fractional unit label
    pub unit_kind: String,
    /// Submitted quantity, always > 0 (zero and junk are dropped at ingestion)
    pub quantity: i64,
}

/// Defines relationships between `OrderLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
