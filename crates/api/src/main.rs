use std::sync::Arc;

use anyhow::Context;

use tally_api::config::ApiConfig;
use tally_infra::LedgerService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tally_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    // In-memory ledger: all state is lost when the process exits.
    let ledger = Arc::new(LedgerService::in_memory());
    let app = tally_api::app::build_app(ledger);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
