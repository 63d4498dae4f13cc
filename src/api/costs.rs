//! Inbound cost sync endpoint.
//!
//! The inventory side authenticates with a static shared secret in the
//! `X-API-KEY` header. A missing server-side key is a deployment mistake
//! and reads as a 500, an invalid client key as a 401 - the same contract
//! the sync script on the other end already expects.

use crate::{
    api::AppState,
    core::costs::{self, CostSyncOutcome, CostUpdate},
    errors::{Error, Result},
};
use axum::{Json, Router, extract::State, http::HeaderMap, routing::post};
use serde::Deserialize;
use tracing::info;

/// Cost sync routes
pub fn router() -> Router<AppState> {
    Router::new().route("/api/update-costs", post(update_costs))
}

/// Batch of cost updates pushed by the inventory system
#[derive(Deserialize)]
struct CostSyncRequest {
    costs: Vec<CostUpdate>,
}

async fn update_costs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CostSyncRequest>,
) -> Result<Json<CostSyncOutcome>> {
    check_api_key(&state, &headers)?;

    let outcome = costs::apply_cost_batch(&state.db, &payload.costs).await?;
    info!(
        updated = outcome.updated,
        unmatched = outcome.unmatched.len(),
        "cost batch applied"
    );
    Ok(Json(outcome))
}

fn check_api_key(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let expected = state.api_key.as_deref().ok_or_else(|| Error::Config {
        message: "API_SECRET_KEY is not configured".to_string(),
    })?;

    let provided = headers.get("X-API-KEY").and_then(|v| v.to_str().ok());
    if provided == Some(expected) {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::api::test_helpers::test_router;
    use crate::errors::Result;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::util::ServiceExt;

    fn request(key: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::post("/api/update-costs").header("content-type", "application/json");
        if let Some(key) = key {
            builder = builder.header("X-API-KEY", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_rejects_missing_key() -> Result<()> {
        let (app, _db) = test_router(Some("secret")).await?;

        let response = app
            .oneshot(request(None, json!({ "costs": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_wrong_key() -> Result<()> {
        let (app, _db) = test_router(Some("secret")).await?;

        let response = app
            .oneshot(request(Some("wrong"), json!({ "costs": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_unconfigured_key_is_a_server_error() -> Result<()> {
        let (app, _db) = test_router(None).await?;

        let response = app
            .oneshot(request(Some("secret"), json!({ "costs": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }

    #[tokio::test]
    async fn test_applies_batch_and_reports_unmatched() -> Result<()> {
        let (app, db) = test_router(Some("secret")).await?;
        crate::test_utils::create_coded_product(&db, "Tomato", "KG", "1001").await?;

        let body = json!({
            "costs": [
                { "internal_code": "1001", "cost": 2.5 },
                { "internal_code": "9999", "cost": 1.0 }
            ]
        });
        let response = app.oneshot(request(Some("secret"), body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let outcome: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(outcome["updated"], 1);
        assert_eq!(outcome["unmatched"], json!(["9999"]));

        Ok(())
    }
}
