use lazy_static::lazy_static;
use std::sync::Arc;

pub mod repository;
pub mod service;

pub type Repository = Arc<Box<dyn repository::Repository>>;

lazy_static! {
    pub static ref KIND: String = "Disruption".to_string();
}
