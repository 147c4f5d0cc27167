use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Persistence {
    pub database_connection_string: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default)]
    pub min_connections: Option<u32>,

    #[serde(default = "default_timeout_millis")]
    pub connect_timeout_millis: u64,

    #[serde(default = "default_timeout_millis")]
    pub acquire_timeout_millis: u64,

    /// Upper bound for a single repository call, including the wait for a pooled connection.
    #[serde(default = "default_operation_timeout_millis")]
    pub operation_timeout_millis: u64,

    #[serde(default)]
    pub sqlx_logging: bool,

    #[serde(default = "default_apply_migrations")]
    pub apply_migrations: bool,
}

impl Persistence {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_millis)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_millis)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_millis)
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_timeout_millis() -> u64 {
    5_000
}

fn default_operation_timeout_millis() -> u64 {
    10_000
}

fn default_apply_migrations() -> bool {
    true
}
