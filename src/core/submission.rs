//! Store order submission - replaces a store's order for a day.
//!
//! A submission arrives as a flat map of form fields: `box_<product>` for
//! whole boxes and `fraction_<product>` for the product's fractional unit,
//! with product names normalized by [`crate::core::field_key`]. Replacement
//! is delete-then-insert inside one transaction, so a store's stored order
//! is always exactly its latest accepted submission and a failure partway
//! leaves the previous order intact.
//!
//! Field values are untrusted: anything that does not parse as an integer
//! strictly greater than zero is dropped without error, and a field naming a
//! product outside the day's catalog is dropped as well.

use crate::{
    core::{BOX_KIND, catalog, field_key},
    entities::{OrderLine, order_line},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::debug;

/// Form field prefix for whole-box quantities
pub const BOX_FIELD_PREFIX: &str = "box_";
/// Form field prefix for fractional-unit quantities
pub const FRACTION_FIELD_PREFIX: &str = "fraction_";

/// Replaces the store's entire order for the date with the submitted fields.
///
/// Returns the number of lines actually stored. Submitting the same payload
/// twice leaves the same row set as submitting it once.
///
/// # Errors
/// Returns an error if the transaction cannot be completed; in that case no
/// rows are changed.
pub async fn replace_store_order(
    db: &DatabaseConnection,
    date: NaiveDate,
    store: &str,
    fields: &HashMap<String, String>,
) -> Result<usize> {
    let day_id = crate::config::schedule::Schedule::day_id_of(date);
    let products = catalog::field_map_for_day(db, day_id).await?;

    let txn = db.begin().await?;

    OrderLine::delete_many()
        .filter(order_line::Column::OrderDate.eq(date))
        .filter(order_line::Column::Store.eq(store))
        .exec(&txn)
        .await?;

    let mut stored = 0;
    for (field, value) in fields {
        let Some(quantity) = parse_quantity(value) else {
            continue;
        };

        let line = if let Some(key) = field.strip_prefix(BOX_FIELD_PREFIX) {
            products.get(key).map(|p| (p.name.clone(), BOX_KIND.to_string()))
        } else if let Some(key) = field.strip_prefix(FRACTION_FIELD_PREFIX) {
            products
                .get(key)
                .map(|p| (p.name.clone(), p.fractional_unit.clone()))
        } else {
            None
        };

        let Some((product, unit_kind)) = line else {
            debug!(field = %field, "dropping field with no matching catalog product");
            continue;
        };

        order_line::ActiveModel {
            order_date: Set(date),
            store: Set(store.to_string()),
            product: Set(product),
            unit_kind: Set(unit_kind),
            quantity: Set(quantity),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        stored += 1;
    }

    txn.commit().await?;
    Ok(stored)
}

/// Reads back the store's stored order for the date as the field map it was
/// submitted as, for pre-filling the order form. Quantities for the same
/// field sum, mirroring the report's aggregation.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn saved_fields(
    db: &DatabaseConnection,
    date: NaiveDate,
    store: &str,
) -> Result<HashMap<String, i64>> {
    let lines = OrderLine::find()
        .filter(order_line::Column::OrderDate.eq(date))
        .filter(order_line::Column::Store.eq(store))
        .all(db)
        .await?;

    let mut fields = HashMap::new();
    for line in lines {
        let prefix = if line.unit_kind == BOX_KIND {
            BOX_FIELD_PREFIX
        } else {
            FRACTION_FIELD_PREFIX
        };
        let field = format!("{prefix}{}", field_key(&line.product));
        *fields.entry(field).or_insert(0) += line.quantity;
    }
    Ok(fields)
}

/// Parses a submitted quantity, accepting only integers strictly greater
/// than zero. Everything else (empty, junk, zero, negative) is a drop.
fn parse_quantity(value: &str) -> Option<i64> {
    match value.trim().parse::<i64>() {
        Ok(q) if q > 0 => Some(q),
        _ => None,
    }
}
