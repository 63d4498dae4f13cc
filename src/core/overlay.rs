//! Final-order overlay - the administrator's curated quantities.
//!
//! The overlay is saved wholesale: every save replaces the complete set of
//! final order lines for the date in one transaction. An empty set is a
//! valid "cleared" state, not an error. Partial failure rolls everything
//! back so the previous overlay stays intact.

use crate::{
    entities::{FinalOrderLine, final_order_line},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};

/// One curated quantity as submitted by the administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalOrderEntry {
    /// Product name
    pub product: String,
    /// Receiving store
    pub store: String,
    /// Finalized quantity (zero is a deliberate decision, unlike a missing
    /// entry, which means "not decided yet")
    pub quantity: i64,
}

/// Replaces the date's entire final-order overlay with the given entries.
///
/// # Errors
/// Returns an error if the transaction cannot be completed; in that case no
/// rows are changed.
pub async fn replace_final_order(
    db: &DatabaseConnection,
    date: NaiveDate,
    entries: &[FinalOrderEntry],
) -> Result<()> {
    let txn = db.begin().await?;

    FinalOrderLine::delete_many()
        .filter(final_order_line::Column::OrderDate.eq(date))
        .exec(&txn)
        .await?;

    if !entries.is_empty() {
        let rows: Vec<final_order_line::ActiveModel> = entries
            .iter()
            .map(|entry| final_order_line::ActiveModel {
                order_date: Set(date),
                product: Set(entry.product.clone()),
                store: Set(entry.store.clone()),
                quantity: Set(entry.quantity),
                ..Default::default()
            })
            .collect();
        FinalOrderLine::insert_many(rows).exec(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
}

/// Retrieves the date's final-order overlay.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn final_order_for(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<Vec<final_order_line::Model>> {
    FinalOrderLine::find()
        .filter(final_order_line::Column::OrderDate.eq(date))
        .all(db)
        .await
        .map_err(Into::into)
}
