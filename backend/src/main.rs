//! Backend entry-point: delivery pricing REST service.

mod server;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    server::run().await
}
