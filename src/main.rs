use anyhow::Context;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alfares_web::config::Config;
use alfares_web::models::Inventory;
use alfares_web::pricing::{OverrideStore, PriceTable, PricingEngine};
use alfares_web::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alfares_web=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let table = PriceTable::load_default();
    let overrides = OverrideStore::load(&config.overrides_path);
    tracing::info!(
        rows = table.len(),
        overrides = overrides.len(),
        path = %config.overrides_path.display(),
        "price data loaded"
    );

    let inventory = Inventory::load_default();
    tracing::info!(billboards = inventory.len(), "billboard inventory loaded");

    let state = AppState::new(PricingEngine::new(table, overrides), inventory);

    let app = routes::router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "serving");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
