//! HTTP surface - thin axum handlers over the core operations.
//!
//! Handlers do no business logic of their own: they resolve "today", call
//! into [`crate::core`], and translate the outcome. Every error is recovered
//! here - persistence failures become a generic 500 without detail, domain
//! states like "not an ordering day" become their own response shapes, and
//! nothing propagates past this boundary.

use crate::{config::schedule::Schedule, errors::Error};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

pub mod admin;
pub mod costs;
pub mod orders;
pub mod report;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// The one database connection pool
    pub db: DatabaseConnection,
    /// Stores and ordering weekdays
    pub schedule: Arc<Schedule>,
    /// Shared secret for the inbound cost sync, from `API_SECRET_KEY`
    pub api_key: Option<String>,
}

/// Builds the application router with all routes attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(report::router())
        .merge(orders::router())
        .merge(admin::router())
        .merge(costs::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Simple health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotOrderingDay { .. } | Self::ProductNotFound { .. } => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Self::DuplicateProduct { .. } => (StatusCode::CONFLICT, self.to_string()),
            Self::UnknownStore { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            Self::Config { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error".to_string(),
            ),
            Self::Database(_) | Self::Io(_) => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The operation failed and no changes were saved".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}


#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::test_helpers::test_router;
    use crate::errors::Result;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint() -> Result<()> {
        let (app, _db) = test_router(None).await?;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");

        Ok(())
    }
}
