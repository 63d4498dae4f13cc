//! Shared test utilities.
//!
//! This module provides common helper functions for setting up in-memory
//! test databases and creating test entities with sensible defaults.

use crate::{
    config::schedule::Schedule,
    core::catalog,
    entities::{OrderLine, order_line, product},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The default schedule (BCS..FCL3, Monday through Saturday), which the
/// tests treat as the chain's configuration.
#[must_use]
pub fn test_schedule() -> Schedule {
    Schedule::default()
}

/// A fixed Monday used as "today" throughout the tests (2024-01-01).
///
/// # Panics
/// Never; the date literal is valid.
#[must_use]
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date literal")
}

/// Creates a test product with the given fractional unit, available on the
/// given weekdays, without an internal code.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    fractional_unit: &str,
    days: &[u32],
) -> Result<product::Model> {
    catalog::create_product(
        db,
        name.to_string(),
        fractional_unit.to_string(),
        None,
        days,
    )
    .await
}

/// Creates a test product carrying an internal code, available on Monday.
pub async fn create_coded_product(
    db: &DatabaseConnection,
    name: &str,
    fractional_unit: &str,
    internal_code: &str,
) -> Result<product::Model> {
    catalog::create_product(
        db,
        name.to_string(),
        fractional_unit.to_string(),
        Some(internal_code.to_string()),
        &[0],
    )
    .await
}

/// Writes a product's cost directly, standing in for the cost sync.
pub async fn set_product_cost(db: &DatabaseConnection, product_id: i64, cost: f64) -> Result<()> {
    let mut active: product::ActiveModel = crate::entities::Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| crate::errors::Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();
    active.cost = Set(cost);
    active.update(db).await?;
    Ok(())
}

/// Inserts a raw order line directly, bypassing submission validation, for
/// exercising the aggregation on already-stored rows.
pub async fn insert_order_line(
    db: &DatabaseConnection,
    date: NaiveDate,
    store: &str,
    product: &str,
    unit_kind: &str,
    quantity: i64,
) -> Result<order_line::Model> {
    order_line::ActiveModel {
        order_date: Set(date),
        store: Set(store.to_string()),
        product: Set(product.to_string()),
        unit_kind: Set(unit_kind.to_string()),
        quantity: Set(quantity),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves the stored order lines for a date and store.
pub async fn order_lines_for(
    db: &DatabaseConnection,
    date: NaiveDate,
    store: &str,
) -> Result<Vec<order_line::Model>> {
    OrderLine::find()
        .filter(order_line::Column::OrderDate.eq(date))
        .filter(order_line::Column::Store.eq(store))
        .all(db)
        .await
        .map_err(Into::into)
}
