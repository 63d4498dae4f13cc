//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod final_order_line;
pub mod order_line;
pub mod product;
pub mod product_availability;

// Re-export specific types to avoid conflicts
pub use final_order_line::{
    Column as FinalOrderLineColumn, Entity as FinalOrderLine, Model as FinalOrderLineModel,
};
pub use order_line::{Column as OrderLineColumn, Entity as OrderLine, Model as OrderLineModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_availability::{
    Column as ProductAvailabilityColumn, Entity as ProductAvailability,
    Model as ProductAvailabilityModel,
};
