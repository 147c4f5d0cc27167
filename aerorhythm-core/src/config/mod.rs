pub mod api;
pub mod job;
pub mod persistence;
pub mod telemetry;

use serde::Deserialize;
use std::{env, path::Path};

use self::{api::Api, job::Job, persistence::Persistence, telemetry::Telemetry};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: Api,
    pub persistence: Persistence,
    #[serde(default)]
    pub job: Job,
    pub telemetry: Telemetry,
}

impl Config {
    pub fn get_config_dir() -> anyhow::Result<String> {
        let mut path = env::current_exe()?;
        path.pop();
        path.push("config");

        if !path.is_dir() {
            if Path::new("aerorhythm-runtime/config").is_dir() {
                return Ok("aerorhythm-runtime/config".into());
            }

            if Path::new("config").is_dir() {
                return Ok("config".into());
            }

            return Err(anyhow::anyhow!("default config dir was not found"));
        }

        match path.to_str() {
            Some(v) => Ok(v.into()),
            _ => Err(anyhow::anyhow!("failed to get default config dir")),
        }
    }

    fn custom(run_mode: String, config_dir: String) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name(&format!("{}/default", config_dir)))
            // Add in the current environment file, this file is optional
            .add_source(
                config::File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false),
            )
            // Add in a local configuration file, this file shouldn't be checked in to git
            .add_source(config::File::with_name(&format!("{}/local", config_dir)).required(false))
            // Eg.. `AERORHYTHM_API__HTTP_PORT=8080 ./aerorhythm-runtime` sets `api.http_port`
            .add_source(
                config::Environment::with_prefix("aerorhythm")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn custom_run_mode(run_mode: String) -> anyhow::Result<Self> {
        let config_dir = match env::var("AERORHYTHM_CONFIG_DIR") {
            Ok(dir) => dir,
            Err(_) => Self::get_config_dir()?,
        };

        Self::custom(run_mode, config_dir)
    }

    pub fn new() -> anyhow::Result<Self> {
        let run_mode = env::var("AERORHYTHM_RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::custom_run_mode(run_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn run_mode_file_overrides_defaults() {
        let config_dir = format!("{}/../config", env!("CARGO_MANIFEST_DIR"));
        let config = Config::custom("test".to_string(), config_dir).unwrap();

        assert_eq!(
            config.persistence.database_connection_string,
            "sqlite::memory:"
        );
        assert_eq!(config.persistence.max_connections, 1);
        assert!(config.persistence.apply_migrations);
        assert_eq!(config.api.http_port, 8000);
        assert_eq!(config.job.max_error_message_length, 1024);
        assert!(config.telemetry.opentelemetry.is_none());
    }
}
