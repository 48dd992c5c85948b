//! API handlers for the events REST endpoints

pub mod events;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    routing::get,
    Json, Router,
};

use crate::{
    error::{AppError, ValidationFailure},
    models::EventDto,
    AppState,
};

/// Build the API router (without documentation and middleware layers)
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Events
        .route("/api/events", get(events::get_all).post(events::save))
        .route("/api/events/filter", get(events::get_event_by_filter))
        .route(
            "/api/events/:id",
            get(events::get_by_id)
                .put(events::update)
                .delete(events::delete_by_id),
        )
        .with_state(state)
}

/// JSON event body that passed field validation
pub struct ValidatedEvent(pub EventDto);

#[async_trait]
impl<S> FromRequest<S> for ValidatedEvent
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_string();
        let Json(dto) = Json::<EventDto>::from_request(req, state).await?;

        let violations = dto.violations();
        if !violations.is_empty() {
            tracing::debug!("Rejected event body on {}: {:?}", path, violations);
            return Err(AppError::Validation(
                ValidationFailure::new(violations).at(path),
            ));
        }

        Ok(ValidatedEvent(dto))
    }
}
