use dotenvy::dotenv;
use hortifruti::{
    api::{self, AppState},
    config,
    errors::Result,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the ordering schedule (stores + weekdays)
    let schedule = config::schedule::load_or_default()?;
    info!(
        stores = schedule.stores.len(),
        ordering_days = schedule.ordering_days.len(),
        "schedule loaded"
    );

    // 4. Connect to the database and make sure the schema exists
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("database initialized");

    // 5. Shared secret for the inbound cost sync; without it the endpoint
    //    refuses requests but the rest of the application works
    let api_key = std::env::var("API_SECRET_KEY").ok();
    if api_key.is_none() {
        warn!("API_SECRET_KEY not set; /api/update-costs will reject all requests");
    }

    // 6. Serve
    let state = AppState {
        db,
        schedule: Arc::new(schedule),
        api_key,
    };
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, api::router(state)).await?;

    Ok(())
}
