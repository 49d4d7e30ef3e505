//! Noticeboard server binary.

use anyhow::Context as _;

use noticeboard_api::context::AppContext;
use noticeboard_api::router;
use noticeboard_domain::config::Config;
use noticeboard_infra::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.observability);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let ctx = AppContext::new(config).context("failed to wire application context")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "noticeboard listening");

    axum::serve(listener, router(ctx)).await.context("server error")?;
    Ok(())
}
