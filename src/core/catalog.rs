//! Product catalog business logic.
//!
//! This module provides functions for creating, retrieving, updating, and
//! deleting catalog products together with their per-weekday availability.
//! The availability rows live and die with the product: creating or editing
//! a product replaces its availability set in the same database transaction,
//! and deleting a product removes its availability rows first so no orphan
//! rows are left behind.

use crate::{
    core::field_key,
    entities::{Product, ProductAvailability, product, product_availability},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, TransactionTrait, prelude::*};

/// Retrieves the products orderable on the given weekday, ordered
/// alphabetically by name. This ordering defines the row order of the daily
/// report.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn products_for_day(db: &DatabaseConnection, day_id: u32) -> Result<Vec<product::Model>> {
    Product::find()
        .inner_join(ProductAvailability)
        .filter(product_availability::Column::DayId.eq(to_day_column(day_id)))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every product with the sorted list of weekday ids it is
/// available on, ordered alphabetically by name. Used by the admin listing.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<(product::Model, Vec<i32>)>> {
    let rows = Product::find()
        .find_with_related(ProductAvailability)
        .order_by_asc(product::Column::Name)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(prod, days)| {
            let mut day_ids: Vec<i32> = days.into_iter().map(|d| d.day_id).collect();
            day_ids.sort_unstable();
            (prod, day_ids)
        })
        .collect())
}

/// Finds a product by its exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Builds a lookup from normalized field identifier to product, for
/// resolving submitted form fields back to the day's catalog.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn field_map_for_day(
    db: &DatabaseConnection,
    day_id: u32,
) -> Result<std::collections::HashMap<String, product::Model>> {
    let products = products_for_day(db, day_id).await?;
    Ok(products
        .into_iter()
        .map(|p| (field_key(&p.name), p))
        .collect())
}

/// Creates a new product available on the given weekdays.
///
/// The product and its availability rows are inserted in one transaction.
/// Cost starts at 0.0 and is only ever set by the cost sync.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - A product with the same name or internal code already exists
/// - The database operations fail
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    fractional_unit: String,
    internal_code: Option<String>,
    days: &[u32],
) -> Result<product::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    ensure_unique(&txn, &name, internal_code.as_deref(), None).await?;

    let inserted = product::ActiveModel {
        name: Set(name),
        fractional_unit: Set(fractional_unit),
        internal_code: Set(internal_code),
        cost: Set(0.0),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    replace_availability(&txn, inserted.id, days).await?;

    txn.commit().await?;
    Ok(inserted)
}

/// Updates a product's name, unit label, internal code, and availability set.
///
/// The field updates and the availability replacement happen in one
/// transaction; the synced cost is left untouched.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The product does not exist
/// - Another product already uses the new name or internal code
/// - The database operations fail
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: String,
    new_fractional_unit: String,
    new_internal_code: Option<String>,
    days: &[u32],
) -> Result<product::Model> {
    let new_name = new_name.trim().to_string();
    if new_name.is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let existing = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    ensure_unique(&txn, &new_name, new_internal_code.as_deref(), Some(existing.id)).await?;

    let mut active: product::ActiveModel = existing.into();
    active.name = Set(new_name);
    active.fractional_unit = Set(new_fractional_unit);
    active.internal_code = Set(new_internal_code);
    let updated = active.update(&txn).await?;

    replace_availability(&txn, updated.id, days).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Deletes a product and its availability rows.
///
/// Historic order lines keep referencing the product by name and are not
/// touched; the product simply stops appearing in future catalogs.
///
/// # Errors
/// Returns an error if the product does not exist or the database
/// operations fail.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    ProductAvailability::delete_many()
        .filter(product_availability::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;

    let res = Product::delete_by_id(product_id).exec(&txn).await?;
    if res.rows_affected == 0 {
        return Err(Error::ProductNotFound {
            name: product_id.to_string(),
        });
    }

    txn.commit().await?;
    Ok(())
}

/// Rejects names and internal codes already used by another product.
async fn ensure_unique(
    txn: &sea_orm::DatabaseTransaction,
    name: &str,
    internal_code: Option<&str>,
    exclude_id: Option<i64>,
) -> Result<()> {
    let mut taken = Condition::any().add(product::Column::Name.eq(name));
    if let Some(code) = internal_code {
        taken = taken.add(product::Column::InternalCode.eq(code));
    }

    let mut query = Product::find().filter(taken);
    if let Some(id) = exclude_id {
        query = query.filter(product::Column::Id.ne(id));
    }

    if query.one(txn).await?.is_some() {
        return Err(Error::DuplicateProduct {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Replaces a product's availability rows with the given weekday set.
async fn replace_availability(
    txn: &sea_orm::DatabaseTransaction,
    product_id: i64,
    days: &[u32],
) -> Result<()> {
    ProductAvailability::delete_many()
        .filter(product_availability::Column::ProductId.eq(product_id))
        .exec(txn)
        .await?;

    let rows: Vec<product_availability::ActiveModel> = days
        .iter()
        .map(|&day| product_availability::ActiveModel {
            product_id: Set(product_id),
            day_id: Set(to_day_column(day)),
        })
        .collect();

    if !rows.is_empty() {
        ProductAvailability::insert_many(rows).exec(txn).await?;
    }
    Ok(())
}

/// Weekday ids are 0..=6, so the narrowing into the column type never wraps.
fn to_day_column(day_id: u32) -> i32 {
    i32::try_from(day_id).unwrap_or(i32::MAX)
}
