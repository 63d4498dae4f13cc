//! Daily report endpoint.

use crate::{
    api::AppState,
    core::report::{self, DailyReport},
    errors::{Error, Result},
};
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

/// Report routes
pub fn router() -> Router<AppState> {
    Router::new().route("/report", get(daily_report))
}

/// Report endpoint response; a non-ordering day is a regular state of the
/// world, not an error
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ReportResponse {
    Report {
        /// Report date as dd/mm/yyyy
        date: String,
        report: DailyReport,
    },
    NotOrderingDay {
        message: String,
    },
}

async fn daily_report(State(state): State<AppState>) -> Result<Json<ReportResponse>> {
    let today = chrono::Local::now().date_naive();
    match report::build_daily_report(&state.db, today, &state.schedule).await {
        Ok(report) => Ok(Json(ReportResponse::Report {
            date: today.format("%d/%m/%Y").to_string(),
            report,
        })),
        Err(Error::NotOrderingDay { .. }) => Ok(Json(ReportResponse::NotOrderingDay {
            message: "Today is not an ordering day, so there is no report".to_string(),
        })),
        Err(e) => Err(e),
    }
}
