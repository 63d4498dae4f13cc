//! Database connection and schema creation using `SeaORM`.
//!
//! The backend is selected entirely by `DATABASE_URL`: a Postgres URL in
//! production, nothing set locally (which falls back to a local `SQLite`
//! file). Every query in the crate goes through the one `DatabaseConnection`,
//! so there is no per-call-site dialect branching anywhere. Tables are
//! created from the entity definitions via `Schema::create_table_from_entity`,
//! which keeps the schema in lockstep with the Rust structs without manual
//! SQL.

use crate::entities::{FinalOrderLine, OrderLine, Product, ProductAvailability};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the environment or returns the default local
/// `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/hortifruti.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the configured database.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all tables from the entity definitions if they do not exist yet.
///
/// # Errors
/// Returns an error if any of the DDL statements fail.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    let mut availability_table = schema.create_table_from_entity(ProductAvailability);
    let mut order_line_table = schema.create_table_from_entity(OrderLine);
    let mut final_order_line_table = schema.create_table_from_entity(FinalOrderLine);

    db.execute(product_table.if_not_exists()).await?;
    db.execute(availability_table.if_not_exists()).await?;
    db.execute(order_line_table.if_not_exists()).await?;
    db.execute(final_order_line_table.if_not_exists()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        final_order_line::Model as FinalOrderLineModel, order_line::Model as OrderLineModel,
        product::Model as ProductModel,
        product_availability::Model as ProductAvailabilityModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<ProductAvailabilityModel> =
            ProductAvailability::find().limit(1).all(&db).await?;
        let _: Vec<OrderLineModel> = OrderLine::find().limit(1).all(&db).await?;
        let _: Vec<FinalOrderLineModel> = FinalOrderLine::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        Ok(())
    }
}
