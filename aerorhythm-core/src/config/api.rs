use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Api {
    pub address: String,
    pub http_port: u16,
}
