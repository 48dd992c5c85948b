//! Business logic services

pub mod events;

use std::sync::Arc;

use crate::{mapper::EventMapper, repository::EventRepository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub events: events::EventsService,
    repository: Arc<dyn EventRepository>,
}

impl Services {
    /// Create all services on top of the given repository
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self {
            events: events::EventsService::new(repository.clone(), EventMapper::new()),
            repository,
        }
    }

    /// Whether the backing store answers
    pub async fn is_ready(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Readiness check failed: {}", e);
                false
            }
        }
    }
}
