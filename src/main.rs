//! numclass server binary.
//!
//! Configuration comes from the environment (a `.env` file is honored); see
//! [`numclass::config`]. Logging follows `RUST_LOG`, default `numclass=info`.

use std::process::ExitCode;

use numclass::{Config, FunFacts, Server, api};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "numclass=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "numclass failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), numclass::Error> {
    let config = Config::from_env()?;
    info!(
        addr = %config.addr,
        fact_source = ?config.fact_source,
        timeout_ms = config.fact_timeout.as_millis() as u64,
        "configuration loaded"
    );

    let app = api::router(FunFacts::from_config(&config)?);
    Server::bind(config.addr).await?.serve(app).await
}
