use std::collections::HashMap;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Telemetry {
    pub stdout: Option<Stdout>,
    pub opentelemetry: Option<OpenTelemetry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Stdout {
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OpenTelemetry {
    pub endpoint: String,
    pub entity_attributes: HashMap<String, String>,
}

fn default_level() -> String {
    "info".to_string()
}
