//! HTTP server for the payroll engine.
//!
//! Configured through `PAYROLL_CONFIG_DIR`, `PAYROLL_BIND_ADDR` and
//! `PAYROLL_THRESHOLD_TIMEOUT_MS`; log filtering follows `RUST_LOG`.

use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, ServerSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default().with(
        fmt::layer()
            .with_ansi(true)
            .with_line_number(true)
            .with_filter(filter),
    );
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = ServerSettings::from_env();
    let config = ConfigLoader::load(&settings.config_dir)?;

    let state = AppState::new(config).with_threshold_timeout(settings.threshold_timeout);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    info!(address = %settings.bind_addr, "Payroll engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
