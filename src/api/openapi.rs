//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{events, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = "0.1.0",
        description = "Create, update, delete and search events"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Events
        events::get_by_id,
        events::save,
        events::get_all,
        events::get_event_by_filter,
        events::delete_by_id,
        events::update,
    ),
    components(
        schemas(
            crate::models::event::EventDto,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "events", description = "Event management and search")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
