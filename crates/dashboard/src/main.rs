use std::time::Duration;

use anyhow::{Context, Result};
use floatchat_dashboard::{build_router, build_state, run_session_janitor, DashboardConfig};
use floatchat_observability::init_tracing;

const JANITOR_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("floatchat_dashboard");

    let config = DashboardConfig::from_env();
    let state = build_state(&config);
    tokio::spawn(run_session_janitor(state.clone(), JANITOR_INTERVAL));
    let app = build_router(state, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed binding {}", config.bind))?;
    tracing::info!(
        bind = %config.bind,
        session_ttl_seconds = config.session_ttl.num_seconds(),
        seeded = config.seed.is_some(),
        "floatchat dashboard started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
