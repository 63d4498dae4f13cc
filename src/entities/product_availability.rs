//! Product availability entity - Maps products to ordering weekdays.
//!
//! Weekday ids follow chrono's days-from-Monday numbering (0 = Monday). A row
//! means the product can be ordered on that weekday.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product/weekday availability database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_availability")]
pub struct Model {
    /// The available product
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// Ordering weekday id (0 = Monday .. 5 = Saturday)
    #[sea_orm(primary_key, auto_increment = false)]
    pub day_id: i32,
}

/// Defines relationships between `ProductAvailability` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each availability row belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
