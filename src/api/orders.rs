//! Store order submission endpoints.
//!
//! `POST /orders/{store}` replaces the store's order for today with the
//! posted field map; `GET /orders/{store}` reads the stored order back in
//! the same field shape, for pre-filling the form. Who is allowed to act
//! for a store is the authentication layer's concern, not ours; the store
//! just has to exist.

use crate::{
    api::AppState,
    core::submission,
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Order submission routes
pub fn router() -> Router<AppState> {
    Router::new().route("/orders/{store}", get(saved_order).post(submit_order))
}

/// Response to a submission
#[derive(Serialize)]
struct SubmitResponse {
    store: String,
    /// Number of lines actually stored after validation drops
    stored: usize,
}

/// A store's stored order in submitted-field shape
#[derive(Serialize)]
struct SavedOrderResponse {
    store: String,
    fields: HashMap<String, i64>,
}

async fn submit_order(
    State(state): State<AppState>,
    Path(store): Path<String>,
    Json(fields): Json<HashMap<String, String>>,
) -> Result<Json<SubmitResponse>> {
    ensure_store(&state, &store)?;
    let today = chrono::Local::now().date_naive();

    let stored = submission::replace_store_order(&state.db, today, &store, &fields).await?;
    info!(store = %store, stored, "order replaced");

    Ok(Json(SubmitResponse { store, stored }))
}

async fn saved_order(
    State(state): State<AppState>,
    Path(store): Path<String>,
) -> Result<Json<SavedOrderResponse>> {
    ensure_store(&state, &store)?;
    let today = chrono::Local::now().date_naive();

    let fields = submission::saved_fields(&state.db, today, &store).await?;
    Ok(Json(SavedOrderResponse { store, fields }))
}

fn ensure_store(state: &AppState, store: &str) -> Result<()> {
    if state.schedule.has_store(store) {
        Ok(())
    } else {
        Err(Error::UnknownStore {
            name: store.to_string(),
        })
    }
}
