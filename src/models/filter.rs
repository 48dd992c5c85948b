//! Search and sort parameters for event listings

use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::IntoParams;

use super::date_format::{self, DATE_PATTERN_HINT};
use crate::error::{AppError, AppResult};

/// Parsed filter descriptor handed to the service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub topic: Option<String>,
    pub is_sort_topic: bool,
    pub topic_sort_direction: Option<String>,
    pub organizer: Option<String>,
    pub is_sort_organizer: bool,
    pub organizer_sort_direction: Option<String>,
    pub from_date: Option<NaiveDateTime>,
    pub to_date: Option<NaiveDateTime>,
    pub is_sort_date: bool,
    pub date_sort_direction: Option<String>,
}

/// Query string of `GET /api/events/filter`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EventFilterQuery {
    /// Part of the topic to search for, e.g. 'ar' matches 'paragraph' and 'arcade'
    pub topic: Option<String>,
    /// Sort by topic; requires `topicSortDirection`
    #[serde(default)]
    pub is_sort_topic: bool,
    /// 'asc' or 'desc'
    pub topic_sort_direction: Option<String>,
    /// Part of the organizer to search for, e.g. 'ar' matches 'paragraph' and 'arcade'
    pub organizer: Option<String>,
    /// Sort by organizer; requires `organizerSortDirection`
    #[serde(default)]
    pub is_sort_organizer: bool,
    /// 'asc' or 'desc'
    pub organizer_sort_direction: Option<String>,
    /// Earliest event date, pattern 'dd-MM-yyyy HH:mm'. Defaults to '01-01-1990 00:00'
    pub from_date: Option<String>,
    /// Latest event date, pattern 'dd-MM-yyyy HH:mm'. Defaults to '01-01-3000 00:00'
    pub to_date: Option<String>,
    /// Sort by date; requires `dateSortDirection`
    #[serde(default)]
    pub is_sort_date: bool,
    /// 'asc' or 'desc'
    pub date_sort_direction: Option<String>,
}

impl EventFilterQuery {
    /// Build the filter descriptor, rejecting dates that do not match the pattern
    pub fn into_filter(self) -> AppResult<EventFilter> {
        Ok(EventFilter {
            topic: self.topic,
            is_sort_topic: self.is_sort_topic,
            topic_sort_direction: self.topic_sort_direction,
            organizer: self.organizer,
            is_sort_organizer: self.is_sort_organizer,
            organizer_sort_direction: self.organizer_sort_direction,
            from_date: parse_query_date("fromDate", self.from_date.as_deref())?,
            to_date: parse_query_date("toDate", self.to_date.as_deref())?,
            is_sort_date: self.is_sort_date,
            date_sort_direction: self.date_sort_direction,
        })
    }
}

fn parse_query_date(name: &str, value: Option<&str>) -> AppResult<Option<NaiveDateTime>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => date_format::parse(raw).map(Some).ok_or_else(|| {
            AppError::InvalidArgument(format!(
                "Invalid value '{}' for {}, expected pattern {}",
                raw, name, DATE_PATTERN_HINT
            ))
        }),
    }
}
