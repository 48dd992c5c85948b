//! Events Server
//!
//! REST JSON API for managing events (topic, description, organizer, date,
//! location) with filtered and sorted listing.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod mapper;
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

impl AppState {
    pub fn new(config: AppConfig, services: services::Services) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
