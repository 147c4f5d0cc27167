pub mod actor;
pub mod config;
pub mod constants;
pub mod errors;
pub mod metric;
pub mod types;
pub mod validation;
