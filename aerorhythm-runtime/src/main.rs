mod http;
mod telemetry;

use aerorhythm_core::config::Config;
use aerorhythm_persistence::Storage;
use aerorhythm_roster::lifecycle::JobManager;
use aerorhythm_roster::strategy::StrategyRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let config = Config::new()?;

    telemetry::setup(&config)?;

    let storage = Storage::connect(&config.persistence).await?;

    if config.persistence.apply_migrations {
        storage.apply_migrations().await?;
    }

    let manager = JobManager::new(&storage, StrategyRegistry::with_defaults(), &config.job);

    if config.job.recover_on_startup {
        let report = manager.recover().await?;

        tracing::info!(
            "recovered jobs: {} interrupted, {} pending dispatched",
            report.interrupted,
            report.dispatched.len()
        );
    }

    http::start_server(config, storage).await
}
