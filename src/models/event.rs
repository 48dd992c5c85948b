//! Event model

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::date_format;
use crate::error::FieldViolation;

pub const BLANK_MESSAGE: &str = "Can't be null";
pub const DATE_MANDATORY_MESSAGE: &str =
    "Date is mandatory field. Please use next pattern for date dd-MM-yyyy HH:mm";

/// Event record as stored in the `event` table
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: i64,
    pub topic: String,
    pub description: String,
    pub organizer: String,
    pub date: NaiveDateTime,
    pub location: String,
}

/// Identity is not part of business equality
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.topic == other.topic
            && self.description == other.description
            && self.organizer == other.organizer
            && self.date == other.date
            && self.location == other.location
    }
}

impl Eq for Event {}

/// Event as exchanged with HTTP clients
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct EventDto {
    /// Assigned by the server; ignored on create and update
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(
        required(message = "Can't be null"),
        custom(function = "not_blank"),
        length(min = 5, max = 50, message = "Topic length should be between 5 and 50 characters")
    )]
    #[schema(example = "Rust meetup")]
    pub topic: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Can't be null"),
        custom(function = "not_blank"),
        length(min = 5, max = 50, message = "Description length should be between 5 and 50 characters")
    )]
    #[schema(example = "Monthly talks and pizza")]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Can't be null"),
        custom(function = "not_blank"),
        length(min = 5, max = 50, message = "Organizer length should be between 5 and 50 characters")
    )]
    #[schema(example = "Rustaceans")]
    pub organizer: Option<String>,

    /// Pattern `dd-MM-yyyy HH:mm`; an unparsable value is read as null
    #[serde(default, with = "date_format::lenient")]
    #[validate(required(
        message = "Date is mandatory field. Please use next pattern for date dd-MM-yyyy HH:mm"
    ))]
    #[schema(value_type = Option<String>, example = "15-06-2025 22:49")]
    pub date: Option<NaiveDateTime>,

    #[serde(default)]
    #[validate(
        required(message = "Can't be null"),
        custom(function = "not_blank"),
        length(min = 5, max = 50, message = "Location length should be between 5 and 50 characters")
    )]
    #[schema(example = "Main hall")]
    pub location: Option<String>,
}

impl PartialEq for EventDto {
    fn eq(&self, other: &Self) -> bool {
        self.topic == other.topic
            && self.description == other.description
            && self.organizer == other.organizer
            && self.date == other.date
            && self.location == other.location
    }
}

impl Eq for EventDto {}

impl EventDto {
    /// Every failed constraint as `(field, message)`, at most one per field,
    /// ordered by field name
    pub fn violations(&self) -> Vec<FieldViolation> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };

        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errors)| {
                errors.first().map(|error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    FieldViolation::new(field.to_string(), message)
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        violations
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some(Cow::Borrowed(BLANK_MESSAGE));
        return Err(error);
    }
    Ok(())
}
