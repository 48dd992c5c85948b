//! Conversion between stored events and their wire form

use crate::{
    error::{AppError, AppResult, ValidationFailure},
    models::{Event, EventDto},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct EventMapper;

impl EventMapper {
    pub fn new() -> Self {
        Self
    }

    /// Validate `dto` and build an entity from it. The id is left at 0, the
    /// caller decides which id the entity gets.
    pub fn to_entity(&self, dto: &EventDto) -> AppResult<Event> {
        let violations = dto.violations();
        if !violations.is_empty() {
            return Err(AppError::Validation(ValidationFailure::new(violations)));
        }

        match (
            &dto.topic,
            &dto.description,
            &dto.organizer,
            dto.date,
            &dto.location,
        ) {
            (Some(topic), Some(description), Some(organizer), Some(date), Some(location)) => {
                Ok(Event {
                    id: 0,
                    topic: topic.clone(),
                    description: description.clone(),
                    organizer: organizer.clone(),
                    date,
                    location: location.clone(),
                })
            }
            _ => Err(AppError::Internal(
                "validated event is missing a field".to_string(),
            )),
        }
    }

    pub fn to_dto(&self, event: Event) -> EventDto {
        EventDto {
            id: Some(event.id),
            topic: Some(event.topic),
            description: Some(event.description),
            organizer: Some(event.organizer),
            date: Some(event.date),
            location: Some(event.location),
        }
    }
}
