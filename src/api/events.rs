//! Events API endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    models::{EventDto, EventFilterQuery},
    AppState,
};

use super::ValidatedEvent;

/// Get event by its id
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Id of event to be searched")),
    responses(
        (status = 200, description = "Event details", body = EventDto),
        (status = 404, description = "No event with this id", body = String)
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EventDto>> {
    let event = state.services.events.get_by_id(id).await?;
    Ok(Json(event))
}

/// Save event. For date use pattern: dd-MM-yyyy HH:mm
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "events",
    request_body = EventDto,
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, description = "Invalid event fields")
    )
)]
pub async fn save(
    State(state): State<AppState>,
    ValidatedEvent(data): ValidatedEvent,
) -> AppResult<(StatusCode, Json<EventDto>)> {
    let event = state.services.events.save(data).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get all events
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "events",
    responses(
        (status = 200, description = "All events", body = Vec<EventDto>)
    )
)]
pub async fn get_all(State(state): State<AppState>) -> AppResult<Json<Vec<EventDto>>> {
    let events = state.services.events.get_all().await?;
    Ok(Json(events))
}

/// Get all events by filter. You can choose filter and sorting parameters
#[utoipa::path(
    get,
    path = "/api/events/filter",
    tag = "events",
    params(EventFilterQuery),
    responses(
        (status = 200, description = "Matching events", body = Vec<EventDto>),
        (status = 204, description = "No event matches"),
        (status = 400, description = "Date range is inverted or a date is malformed", body = String)
    )
)]
pub async fn get_event_by_filter(
    State(state): State<AppState>,
    query: Result<Query<EventFilterQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let filter = query.into_filter()?;

    let events = state.services.events.get_list_event_by_filter(&filter).await?;
    if events.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(events).into_response())
}

/// Delete event by id
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Id of event to be deleted")),
    responses(
        (status = 200, description = "Whether an event was deleted", body = String)
    )
)]
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<String> {
    let deleted = state.services.events.delete_by_id(id).await?;
    if deleted > 0 {
        Ok(format!("Event was successfully deleted with id = {}", id))
    } else {
        Ok(format!("Event was not found by such id = {}", id))
    }
}

/// Update event by id and new body
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Id of event to be updated")),
    request_body = EventDto,
    responses(
        (status = 204, description = "Event updated"),
        (status = 400, description = "Invalid event fields"),
        (status = 404, description = "No event with this id", body = String)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedEvent(data): ValidatedEvent,
) -> AppResult<StatusCode> {
    state.services.events.update(id, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}
