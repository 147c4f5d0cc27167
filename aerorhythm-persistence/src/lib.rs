use aerorhythm_core::config::persistence::Persistence;
use aerorhythm_core::errors::Error;
use aerorhythm_core::{metric, types};
use aerorhythm_persistence_migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::future::Future;
use std::time::Duration;

pub mod crew;
pub mod disruption;
pub mod flight;
pub mod job;
pub mod roster_assignment;

/// Ready-to-use handle over the connection pool. Cloning is cheap and shares the pool.
#[derive(Clone, Debug)]
pub struct Storage {
    connection: DatabaseConnection,
    operation_timeout: Duration,
}

impl Storage {
    pub async fn connect(config: &Persistence) -> types::Result<Self> {
        let mut connect_opts = ConnectOptions::new(config.database_connection_string.clone());

        connect_opts
            .max_connections(config.max_connections)
            .connect_timeout(config.connect_timeout())
            .acquire_timeout(config.acquire_timeout())
            .sqlx_logging(config.sqlx_logging)
            .sqlx_logging_level(log::LevelFilter::Trace)
            .sqlx_slow_statements_logging_settings(
                log::LevelFilter::Warn,
                Duration::from_millis(100),
            );

        if let Some(min_connections) = config.min_connections {
            connect_opts.min_connections(min_connections);
        }

        let connection = Database::connect(connect_opts).await.map_err(|e| {
            metric::storage_unavailable_count_metric()
                .with_label_values(&["connect"])
                .inc();

            Error::StorageUnavailable {
                message: "failed to open database connection pool".to_string(),
                source: anyhow::anyhow!(e),
            }
        })?;

        tracing::info!(
            "connected to database with {} max connections",
            config.max_connections
        );

        Ok(Self::from_connection(connection, config.operation_timeout()))
    }

    pub fn from_connection(connection: DatabaseConnection, operation_timeout: Duration) -> Self {
        Self {
            connection,
            operation_timeout,
        }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub async fn apply_migrations(&self) -> types::Result<()> {
        Migrator::up(&self.connection, None).await?;

        tracing::info!("database migrations are up to date");

        Ok(())
    }

    /// Runs one logical storage operation under the configured timeout. Expiry and
    /// connectivity failures both surface as `StorageUnavailable`.
    pub async fn bounded<T, F>(&self, operation: &str, fut: F) -> types::Result<T>
    where
        F: Future<Output = types::Result<T>>,
    {
        let result = match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(Error::StorageUnavailable {
                message: format!(
                    "operation '{}' timed out after {:?}",
                    operation, self.operation_timeout
                ),
                source: anyhow::anyhow!("storage operation timed out"),
            }),
        };

        if let Err(e) = &result {
            if e.is_retryable() {
                metric::storage_unavailable_count_metric()
                    .with_label_values(&[operation])
                    .inc();

                tracing::warn!("storage operation '{}' is unavailable: {}", operation, e);
            }
        }

        result
    }
}
