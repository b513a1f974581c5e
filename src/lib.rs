//! ShareIt Item Lending Server
//!
//! A Rust implementation of the ShareIt peer-to-peer lending backend,
//! providing a REST JSON API for listing items, booking them for date
//! ranges and commenting after completed bookings.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
