//! Administrator endpoints: catalog maintenance and the final-order
//! overlay.
//!
//! The overlay save is all-or-nothing: the posted entries replace today's
//! whole set, and an empty post is a deliberate "cleared" state. The pivot
//! endpoint turns posted entries into the dense export grid the PDF/CSV
//! renderer consumes; rendering itself happens elsewhere.

use crate::{
    api::AppState,
    core::{
        catalog,
        overlay::{self, FinalOrderEntry},
        report::{self, FinalOrderPivot},
    },
    errors::Result,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::product;

/// Admin routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/final-order", get(get_final_order).post(save_final_order))
        .route("/final-order/pivot", post(pivot_final_order))
}

/// Product fields as submitted by the admin form
#[derive(Deserialize)]
struct ProductPayload {
    name: String,
    fractional_unit: String,
    internal_code: Option<String>,
    /// Ordering weekday ids the product is available on
    #[serde(default)]
    days: Vec<u32>,
}

/// One product with its availability, for the admin listing
#[derive(Serialize)]
struct ProductListing {
    #[serde(flatten)]
    product: product::Model,
    days: Vec<i32>,
}

async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductListing>>> {
    let products = catalog::list_products(&state.db).await?;
    Ok(Json(
        products
            .into_iter()
            .map(|(product, days)| ProductListing { product, days })
            .collect(),
    ))
}

async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<product::Model>)> {
    let created = catalog::create_product(
        &state.db,
        payload.name,
        payload.fractional_unit,
        payload.internal_code,
        &payload.days,
    )
    .await?;
    info!(product = %created.name, "product created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<product::Model>> {
    let updated = catalog::update_product(
        &state.db,
        id,
        payload.name,
        payload.fractional_unit,
        payload.internal_code,
        &payload.days,
    )
    .await?;
    info!(product = %updated.name, "product updated");
    Ok(Json(updated))
}

async fn delete_product(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    catalog::delete_product(&state.db, id).await?;
    info!(id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn save_final_order(
    State(state): State<AppState>,
    Json(entries): Json<Vec<FinalOrderEntry>>,
) -> Result<Json<serde_json::Value>> {
    let today = chrono::Local::now().date_naive();
    overlay::replace_final_order(&state.db, today, &entries).await?;
    info!(entries = entries.len(), "final order saved");
    Ok(Json(
        serde_json::json!({ "status": "success", "message": "Final order saved" }),
    ))
}

async fn get_final_order(State(state): State<AppState>) -> Result<Json<Vec<FinalOrderEntry>>> {
    let today = chrono::Local::now().date_naive();
    let lines = overlay::final_order_for(&state.db, today).await?;
    Ok(Json(
        lines
            .into_iter()
            .map(|line| FinalOrderEntry {
                product: line.product,
                store: line.store,
                quantity: line.quantity,
            })
            .collect(),
    ))
}

async fn pivot_final_order(
    State(state): State<AppState>,
    Json(entries): Json<Vec<FinalOrderEntry>>,
) -> Result<Json<FinalOrderPivot>> {
    Ok(Json(report::pivot_final_quantities(
        &entries,
        &state.schedule.stores,
    )))
}
