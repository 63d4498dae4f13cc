//! Daily report building - the aggregation step of the ordering tool.
//!
//! Raw order lines are collapsed into a dense product-by-store grid, split
//! into whole-box and fractional-unit quantities, sum-aggregated across
//! duplicate lines. The row set is exactly the day's catalog (products
//! nobody ordered still appear with zero) and the column set is exactly the
//! configured store list (lines from unknown stores are dropped). On top of
//! the raw grid sits the administrator's final-order overlay: a saved value
//! surfaces as `Some(quantity)`, and its absence stays `None` so the
//! presentation can render a blank editable field instead of a zero.

use crate::{
    config::schedule::Schedule,
    core::{BOX_KIND, catalog, field_key, overlay, overlay::FinalOrderEntry},
    entities::{OrderLine, order_line},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// The full aggregated report for one ordering day
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    /// Display name of the ordering weekday
    pub day_name: String,
    /// Store column order, straight from the schedule
    pub stores: Vec<String>,
    /// One row per catalog product, in catalog name order
    pub rows: Vec<ReportRow>,
}

/// One product row of the report
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    /// Product name
    pub product: String,
    /// Unit cost formatted as "R$ 0,00"
    pub cost: String,
    /// One cell per configured store, in store order
    pub cells: Vec<StoreCell>,
}

/// One (product, store) cell of the report
#[derive(Debug, Clone, Serialize)]
pub struct StoreCell {
    /// Store identifier
    pub store: String,
    /// Summed whole-box quantity
    pub boxes: i64,
    /// Summed fractional quantity with its lowercased unit label, or "0"
    pub fraction: String,
    /// Stable identifier correlating this cell with the admin form field
    pub field_id: String,
    /// The administrator's saved final quantity; `None` means not decided
    pub saved: Option<i64>,
}

impl StoreCell {
    /// Renders the cell the way the report table shows it: boxes and
    /// fraction concatenated when both were ordered, either one alone
    /// otherwise, and a literal "0" when the store ordered nothing.
    #[must_use]
    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.boxes > 0 {
            parts.push(format!("{} cx", self.boxes));
        }
        if self.fraction != "0" {
            parts.push(self.fraction.clone());
        }
        if parts.is_empty() {
            "0".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Builds the aggregated report for the given date.
///
/// # Errors
/// Returns [`Error::NotOrderingDay`] when the date's weekday is outside the
/// ordering schedule, so callers can distinguish "nothing ordered" from
/// "not an ordering day". Database failures propagate as errors. An
/// ordering day with an empty catalog yields an empty report with the full
/// store column structure.
pub async fn build_daily_report(
    db: &DatabaseConnection,
    date: NaiveDate,
    schedule: &Schedule,
) -> Result<DailyReport> {
    let day_id = Schedule::day_id_of(date);
    let day_name = schedule
        .day_name(day_id)
        .ok_or(Error::NotOrderingDay { weekday: day_id })?
        .to_string();

    let products = catalog::products_for_day(db, day_id).await?;
    if products.is_empty() {
        return Ok(DailyReport {
            day_name,
            stores: schedule.stores.clone(),
            rows: Vec::new(),
        });
    }

    let raw_lines = OrderLine::find()
        .filter(order_line::Column::OrderDate.eq(date))
        .all(db)
        .await?;
    let final_lines = overlay::final_order_for(db, date).await?;

    // Partition into the box grid and the fractional grid, summing across
    // duplicate (product, store) lines. Lines whose unit kind matches
    // neither "Box" nor one of the day's fractional labels are stale data
    // from a catalog edit and contribute nothing.
    let labels: HashSet<&str> = products.iter().map(|p| p.fractional_unit.as_str()).collect();
    let mut boxes: HashMap<(String, String), i64> = HashMap::new();
    let mut fractions: HashMap<(String, String), i64> = HashMap::new();
    for line in raw_lines {
        let grid = if line.unit_kind == BOX_KIND {
            &mut boxes
        } else if labels.contains(line.unit_kind.as_str()) {
            &mut fractions
        } else {
            continue;
        };
        *grid.entry((line.product, line.store)).or_insert(0) += line.quantity;
    }

    let mut saved: HashMap<(String, String), i64> = HashMap::new();
    for line in final_lines {
        saved.insert((line.product, line.store), line.quantity);
    }

    let rows = products
        .iter()
        .map(|product| {
            let cells = schedule
                .stores
                .iter()
                .map(|store| {
                    let key = (product.name.clone(), store.clone());
                    let box_qty = boxes.get(&key).copied().unwrap_or(0);
                    let fraction_qty = fractions.get(&key).copied().unwrap_or(0);
                    let fraction = if fraction_qty > 0 {
                        format!("{fraction_qty} {}", product.fractional_unit.to_lowercase())
                    } else {
                        "0".to_string()
                    };
                    StoreCell {
                        store: store.clone(),
                        boxes: box_qty,
                        fraction,
                        field_id: format!("order_{}_{store}", field_key(&product.name)),
                        saved: saved.get(&key).copied(),
                    }
                })
                .collect();
            ReportRow {
                product: product.name.clone(),
                cost: format_cost(product.cost),
                cells,
            }
        })
        .collect();

    Ok(DailyReport {
        day_name,
        stores: schedule.stores.clone(),
        rows,
    })
}

/// Formats a unit cost the way the chain writes prices: "R$ " plus the
/// amount with a comma decimal separator.
#[must_use]
pub fn format_cost(cost: f64) -> String {
    format!("R$ {cost:.2}").replace('.', ",")
}

/// Dense product-by-store grid of finalized quantities, for the tabular
/// (CSV/PDF) export of the curated order
#[derive(Debug, Clone, Serialize)]
pub struct FinalOrderPivot {
    /// Store column order
    pub stores: Vec<String>,
    /// One row per product, sorted by name
    pub rows: Vec<PivotRow>,
}

/// One row of the export grid
#[derive(Debug, Clone, Serialize)]
pub struct PivotRow {
    /// Product name
    pub product: String,
    /// Summed finalized quantity per store, in store order
    pub quantities: Vec<i64>,
}

/// Pivots curated final-order entries into the dense export grid: rows are
/// the submitted products sorted by name, columns the configured stores,
/// duplicate entries sum, and missing cells are zero. Entries for stores
/// outside the configured list are dropped.
#[must_use]
pub fn pivot_final_quantities(entries: &[FinalOrderEntry], stores: &[String]) -> FinalOrderPivot {
    let mut grid: BTreeMap<&str, HashMap<&str, i64>> = BTreeMap::new();
    for entry in entries {
        *grid
            .entry(entry.product.as_str())
            .or_default()
            .entry(entry.store.as_str())
            .or_insert(0) += entry.quantity;
    }

    let rows = grid
        .into_iter()
        .map(|(product, cells)| PivotRow {
            product: product.to_string(),
            quantities: stores
                .iter()
                .map(|store| cells.get(store.as_str()).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    FinalOrderPivot {
        stores: stores.to_vec(),
        rows,
    }
}
