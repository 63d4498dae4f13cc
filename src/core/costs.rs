//! Product cost sync - applies cost batches from the inventory system.
//!
//! The external side periodically pushes {internal_code, cost} pairs. The
//! apply is idempotent (costs are overwritten, not accumulated) and runs in
//! one transaction. Codes that match no product are collected and reported
//! back to the sender rather than dropped, so the inventory side can see
//! which of its articles the catalog does not know about.

use crate::{
    entities::{Product, product},
    errors::Result,
};
use sea_orm::sea_query::Expr;
use sea_orm::{TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One cost update from the inventory system
#[derive(Debug, Clone, Deserialize)]
pub struct CostUpdate {
    /// Product code in the inventory system
    pub internal_code: String,
    /// New unit cost
    pub cost: f64,
}

/// Result of applying a cost batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct CostSyncOutcome {
    /// Number of products whose cost was written
    pub updated: usize,
    /// Codes that matched no catalog product
    pub unmatched: Vec<String>,
}

/// Applies a batch of cost updates in one transaction.
///
/// Updates with a non-finite or negative cost are skipped with a warning;
/// the report side tolerates stale costs, so a bad value must never poison
/// the catalog.
///
/// # Errors
/// Returns an error if the transaction cannot be completed; in that case no
/// costs are changed.
pub async fn apply_cost_batch(
    db: &DatabaseConnection,
    updates: &[CostUpdate],
) -> Result<CostSyncOutcome> {
    let txn = db.begin().await?;

    let mut outcome = CostSyncOutcome::default();
    for update in updates {
        if !update.cost.is_finite() || update.cost < 0.0 {
            warn!(
                internal_code = %update.internal_code,
                cost = update.cost,
                "skipping cost update with invalid value"
            );
            continue;
        }

        let res = Product::update_many()
            .col_expr(product::Column::Cost, Expr::value(update.cost))
            .filter(product::Column::InternalCode.eq(&update.internal_code))
            .exec(&txn)
            .await?;

        if res.rows_affected == 0 {
            outcome.unmatched.push(update.internal_code.clone());
        } else {
            outcome.updated += 1;
        }
    }

    txn.commit().await?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::catalog::get_product_by_name;
    use crate::test_utils::*;

    fn update(code: &str, cost: f64) -> CostUpdate {
        CostUpdate {
            internal_code: code.to_string(),
            cost,
        }
    }

    #[tokio::test]
    async fn test_apply_updates_matching_products() -> Result<()> {
        let db = setup_test_db().await?;
        create_coded_product(&db, "Tomato", "KG", "1001").await?;
        create_coded_product(&db, "Onion", "KG", "1002").await?;

        let outcome =
            apply_cost_batch(&db, &[update("1001", 2.5), update("1002", 1.75)]).await?;

        assert_eq!(outcome.updated, 2);
        assert!(outcome.unmatched.is_empty());
        assert_eq!(get_product_by_name(&db, "Tomato").await?.unwrap().cost, 2.5);
        assert_eq!(get_product_by_name(&db, "Onion").await?.unwrap().cost, 1.75);

        Ok(())
    }

    #[tokio::test]
    async fn test_unmatched_codes_are_reported() -> Result<()> {
        let db = setup_test_db().await?;
        create_coded_product(&db, "Tomato", "KG", "1001").await?;

        let outcome = apply_cost_batch(&db, &[update("1001", 2.5), update("9999", 3.0)]).await?;

        assert_eq!(outcome.updated, 1);
        assert_eq!(outcome.unmatched, vec!["9999".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_apply_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        create_coded_product(&db, "Tomato", "KG", "1001").await?;

        apply_cost_batch(&db, &[update("1001", 2.5)]).await?;
        apply_cost_batch(&db, &[update("1001", 2.5)]).await?;

        assert_eq!(get_product_by_name(&db, "Tomato").await?.unwrap().cost, 2.5);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_costs_are_skipped() -> Result<()> {
        let db = setup_test_db().await?;
        create_coded_product(&db, "Tomato", "KG", "1001").await?;
        apply_cost_batch(&db, &[update("1001", 2.5)]).await?;

        let outcome = apply_cost_batch(
            &db,
            &[
                update("1001", f64::NAN),
                update("1001", f64::INFINITY),
                update("1001", -1.0),
            ],
        )
        .await?;

        assert_eq!(outcome.updated, 0);
        assert!(outcome.unmatched.is_empty());
        assert_eq!(get_product_by_name(&db, "Tomato").await?.unwrap().cost, 2.5);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_no_op() -> Result<()> {
        let db = setup_test_db().await?;

        let outcome = apply_cost_batch(&db, &[]).await?;
        assert_eq!(outcome.updated, 0);
        assert!(outcome.unmatched.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_products_without_code_are_never_matched() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_product(&db, "Tomato", "KG", &[0]).await?;

        let outcome = apply_cost_batch(&db, &[update("1001", 2.5)]).await?;
        assert_eq!(outcome.updated, 0);
        assert_eq!(outcome.unmatched, vec!["1001".to_string()]);
        assert_eq!(get_product_by_name(&db, "Tomato").await?.unwrap().cost, 0.0);

        Ok(())
    }
}
