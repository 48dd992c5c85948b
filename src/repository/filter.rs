//! Filtered retrieval: selection predicate and ordered sort keys
//!
//! Both repository backends share this module. PostgreSQL renders the
//! criteria as a `WHERE`/`ORDER BY` pair, the in-memory store evaluates
//! [`FilterCriteria::matches`] and sorts with [`compare`].

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::models::{Event, EventFilter};

pub const ASCENDING_SORTING: &str = "asc";
pub const DESCENDING_SORTING: &str = "desc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Topic,
    Organizer,
    Date,
}

impl SortField {
    /// Sort expression; text columns use byte order, like [`SortKey::compare`]
    pub fn column(self) -> &'static str {
        match self {
            SortField::Topic => "topic COLLATE \"C\"",
            SortField::Organizer => "organizer COLLATE \"C\"",
            SortField::Date => "\"date\"",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Only the exact literals `asc` and `desc` are recognised
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            ASCENDING_SORTING => Some(SortDirection::Asc),
            DESCENDING_SORTING => Some(SortDirection::Desc),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        let ordering = match self.field {
            SortField::Topic => a.topic.cmp(&b.topic),
            SortField::Organizer => a.organizer.cmp(&b.organizer),
            SortField::Date => a.date.cmp(&b.date),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Resolved filter: the date range is already defaulted and validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub organizer: String,
    pub topic: String,
    pub sort_topic: bool,
    pub sort_date: bool,
    pub sort_organizer: bool,
    pub topic_direction: String,
    pub organizer_direction: String,
    pub date_direction: String,
}

impl FilterCriteria {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime, filter: &EventFilter) -> Self {
        Self {
            from,
            to,
            organizer: filter.organizer.clone().unwrap_or_default(),
            topic: filter.topic.clone().unwrap_or_default(),
            sort_topic: filter.is_sort_topic,
            sort_date: filter.is_sort_date,
            sort_organizer: filter.is_sort_organizer,
            topic_direction: filter.topic_sort_direction.clone().unwrap_or_default(),
            organizer_direction: filter.organizer_sort_direction.clone().unwrap_or_default(),
            date_direction: filter.date_sort_direction.clone().unwrap_or_default(),
        }
    }

    /// Date inside `[from, to]`, organizer and topic containing their filters
    pub fn matches(&self, event: &Event) -> bool {
        event.date >= self.from
            && event.date <= self.to
            && event.organizer.contains(self.organizer.as_str())
            && event.topic.contains(self.topic.as_str())
    }

    /// Sort keys in precedence order: topic, organizer, date
    pub fn sort_keys(&self) -> Vec<SortKey> {
        [
            (SortField::Topic, self.sort_topic, &self.topic_direction),
            (SortField::Organizer, self.sort_organizer, &self.organizer_direction),
            (SortField::Date, self.sort_date, &self.date_direction),
        ]
        .into_iter()
        .filter(|(_, enabled, _)| *enabled)
        .filter_map(|(field, _, direction)| {
            SortDirection::parse(direction).map(|direction| SortKey { field, direction })
        })
        .collect()
    }
}

/// Multi-key comparison, first key is primary
pub fn compare(keys: &[SortKey], a: &Event, b: &Event) -> Ordering {
    keys.iter()
        .map(|key| key.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Select and order `events`, keeping their relative order on ties
pub fn apply<I>(events: I, criteria: &FilterCriteria) -> Vec<Event>
where
    I: IntoIterator<Item = Event>,
{
    let keys = criteria.sort_keys();
    let mut selected: Vec<Event> = events
        .into_iter()
        .filter(|event| criteria.matches(event))
        .collect();
    if !keys.is_empty() {
        selected.sort_by(|a, b| compare(&keys, a, b));
    }
    selected
}

/// `ORDER BY` clause for the keys, empty when there are none
pub fn order_by_clause(keys: &[SortKey]) -> String {
    if keys.is_empty() {
        return String::new();
    }
    let terms: Vec<String> = keys
        .iter()
        .map(|key| format!("{} {}", key.field.column(), key.direction.keyword()))
        .collect();
    format!(" ORDER BY {}", terms.join(", "))
}

/// `LIKE` pattern matching `value` anywhere, with wildcards in `value` escaped
pub fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
