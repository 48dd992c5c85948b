//! Events service

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

use crate::{
    error::{AppError, AppResult},
    mapper::EventMapper,
    models::{date_format, EventDto, EventFilter},
    repository::{EventRepository, FilterCriteria},
};

/// Lower bound used when a filter has no `fromDate`
pub static MIN_DATE: Lazy<NaiveDateTime> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(1990, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
});

/// Upper bound used when a filter has no `toDate`
pub static MAX_DATE: Lazy<NaiveDateTime> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(3000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MAX)
});

#[derive(Clone)]
pub struct EventsService {
    repository: Arc<dyn EventRepository>,
    mapper: EventMapper,
}

impl EventsService {
    pub fn new(repository: Arc<dyn EventRepository>, mapper: EventMapper) -> Self {
        Self { repository, mapper }
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<EventDto> {
        let event = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(self.mapper.to_dto(event))
    }

    /// Persist a new event and return `dto` carrying the assigned id
    pub async fn save(&self, mut dto: EventDto) -> AppResult<EventDto> {
        let event = self.repository.save(self.mapper.to_entity(&dto)?).await?;
        tracing::info!("Created event id={}", event.id);
        dto.id = Some(event.id);
        Ok(dto)
    }

    pub async fn get_all(&self) -> AppResult<Vec<EventDto>> {
        let events = self.repository.get_all().await?;
        Ok(events.into_iter().map(|e| self.mapper.to_dto(e)).collect())
    }

    /// Events matching `filter`. Missing range ends fall back to
    /// [`MIN_DATE`] and [`MAX_DATE`]; an inverted range is rejected.
    pub async fn get_list_event_by_filter(&self, filter: &EventFilter) -> AppResult<Vec<EventDto>> {
        let to = filter.to_date.unwrap_or(*MAX_DATE);
        let from = filter.from_date.unwrap_or(*MIN_DATE);
        check_from_is_before_to(&from, &to)?;

        let criteria = FilterCriteria::new(from, to, filter);
        tracing::debug!("Listing events by filter: {:?}", criteria);

        let events = self.repository.get_all_by_filter(&criteria).await?;
        Ok(events.into_iter().map(|e| self.mapper.to_dto(e)).collect())
    }

    /// Number of deleted rows; deleting a missing id is not an error
    pub async fn delete_by_id(&self, id: i64) -> AppResult<u64> {
        let deleted = self.repository.delete(id).await?;
        tracing::info!("Delete event id={} removed {} row(s)", id, deleted);
        Ok(deleted)
    }

    /// Overwrite every field of event `id`; any id inside `dto` is ignored.
    /// Existence is decided by the write itself, so a row deleted
    /// concurrently is reported as not found.
    pub async fn update(&self, id: i64, dto: &EventDto) -> AppResult<()> {
        let mut event = self.mapper.to_entity(dto)?;
        event.id = id;
        if self.repository.update(&event).await? == 0 {
            return Err(not_found(id));
        }
        tracing::info!("Updated event id={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Event was not found by id = {}", id))
}

fn check_from_is_before_to(from: &NaiveDateTime, to: &NaiveDateTime) -> AppResult<()> {
    if from > to {
        return Err(AppError::InvalidArgument(format!(
            "Date from {{{}}} can't be after the date to {{{}}}",
            date_format::iso(from),
            date_format::iso(to)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;
    use crate::repository::{InMemoryEventRepository, MockEventRepository};
    use tokio_test::{assert_err, assert_ok};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn dto(topic: &str, organizer: &str, date: NaiveDateTime) -> EventDto {
        EventDto {
            id: None,
            topic: Some(topic.to_string()),
            description: Some("A description".to_string()),
            organizer: Some(organizer.to_string()),
            date: Some(date),
            location: Some("Main hall".to_string()),
        }
    }

    fn memory_service() -> EventsService {
        EventsService::new(Arc::new(InMemoryEventRepository::new()), EventMapper::new())
    }

    fn mock_service(repo: MockEventRepository) -> EventsService {
        EventsService::new(Arc::new(repo), EventMapper::new())
    }

    fn topics(events: &[EventDto]) -> Vec<&str> {
        events.iter().filter_map(|e| e.topic.as_deref()).collect()
    }

    #[tokio::test]
    async fn test_saved_event_reads_back() {
        let service = memory_service();
        let input = dto("Rust meetup", "Rustaceans", at(2025, 6, 15, 18));

        let saved = service.save(input.clone()).await.unwrap();
        let id = saved.id.expect("id assigned");
        let fetched = service.get_by_id(id).await.unwrap();

        assert_eq!(fetched, input);
        assert_eq!(fetched.id, Some(id));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let mut repo = MockEventRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let err = mock_service(repo).get_by_id(17).await.unwrap_err();

        assert!(matches!(&err, AppError::NotFound(msg) if msg == "Event was not found by id = 17"));
    }

    #[tokio::test]
    async fn test_get_all_preserves_store_order() {
        let service = memory_service();
        for topic in ["zeta event", "alpha event", "mid event"] {
            service.save(dto(topic, "organizer", at(2025, 1, 1, 0))).await.unwrap();
        }

        let all = service.get_all().await.unwrap();
        assert_eq!(topics(&all), vec!["zeta event", "alpha event", "mid event"]);
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected_before_querying() {
        let mut repo = MockEventRepository::new();
        repo.expect_get_all_by_filter().never();

        let minute = |year| {
            NaiveDate::from_ymd_opt(year, 6, 15)
                .unwrap()
                .and_hms_opt(22, 49, 0)
                .unwrap()
        };
        let filter = EventFilter {
            from_date: Some(minute(2032)),
            to_date: Some(minute(2025)),
            ..Default::default()
        };
        let err = mock_service(repo)
            .get_list_event_by_filter(&filter)
            .await
            .unwrap_err();

        match err {
            AppError::InvalidArgument(msg) => assert_eq!(
                msg,
                "Date from {2032-06-15T22:49} can't be after the date to {2025-06-15T22:49}"
            ),
            other => panic!("expected invalid argument, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_from_after_default_upper_bound_is_rejected() {
        let service = memory_service();
        let filter = EventFilter {
            from_date: Some(at(3001, 1, 1, 0)),
            ..Default::default()
        };

        assert_err!(service.get_list_event_by_filter(&filter).await);
    }

    #[tokio::test]
    async fn test_missing_bounds_use_sentinels() {
        let mut repo = MockEventRepository::new();
        repo.expect_get_all_by_filter()
            .withf(|c| {
                c.from == at(1990, 1, 1, 0) && c.to == at(3000, 1, 1, 0) && c.topic.is_empty()
            })
            .times(1)
            .returning(|_| Ok(vec![]));

        let result = mock_service(repo)
            .get_list_event_by_filter(&EventFilter::default())
            .await;

        assert_eq!(assert_ok!(result), vec![]);
    }

    #[tokio::test]
    async fn test_filter_by_organizer_substring() {
        // "desk" is below the length rule, so rows go straight to the store
        let repo = InMemoryEventRepository::new();
        for organizer in ["arcade", "paragraph", "desk"] {
            repo.save(Event {
                id: 0,
                topic: format!("{} topic", organizer),
                description: "A description".into(),
                organizer: organizer.into(),
                date: at(2025, 1, 1, 0),
                location: "Main hall".into(),
            })
            .await
            .unwrap();
        }
        let service = EventsService::new(Arc::new(repo), EventMapper::new());

        let filter = EventFilter {
            organizer: Some("ar".into()),
            ..Default::default()
        };
        let found = service.get_list_event_by_filter(&filter).await.unwrap();

        assert_eq!(topics(&found), vec!["arcade topic", "paragraph topic"]);
    }

    #[tokio::test]
    async fn test_filter_sorts_by_date_descending() {
        let service = memory_service();
        service.save(dto("early event", "organizer", at(2025, 1, 1, 0))).await.unwrap();
        service.save(dto("late event", "organizer", at(2025, 3, 1, 0))).await.unwrap();
        service.save(dto("middle event", "organizer", at(2025, 2, 1, 0))).await.unwrap();

        let filter = EventFilter {
            is_sort_date: true,
            date_sort_direction: Some("desc".into()),
            ..Default::default()
        };
        let found = service.get_list_event_by_filter(&filter).await.unwrap();

        assert_eq!(topics(&found), vec!["late event", "middle event", "early event"]);
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let service = memory_service();
        let saved = service
            .save(dto("Rust meetup", "Rustaceans", at(2025, 6, 15, 18)))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        assert_eq!(service.delete_by_id(id).await.unwrap(), 1);
        assert_eq!(service.delete_by_id(id).await.unwrap(), 0);
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_leaves_store_unchanged() {
        let service = memory_service();
        let kept = service
            .save(dto("Rust meetup", "Rustaceans", at(2025, 6, 15, 18)))
            .await
            .unwrap();

        let err = service
            .update(99, &dto("New topic", "New organizer", at(2025, 7, 1, 0)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(msg) if msg == "Event was not found by id = 99"));
        assert_eq!(service.get_all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_update_of_vanished_row_is_not_found() {
        let mut repo = MockEventRepository::new();
        repo.expect_update()
            .withf(|e| e.id == 5)
            .times(1)
            .returning(|_| Ok(0));

        let err = mock_service(repo)
            .update(5, &dto("Rust meetup", "Rustaceans", at(2025, 6, 15, 18)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(msg) if msg.ends_with("= 5")));
    }

    #[tokio::test]
    async fn test_update_forces_path_id() {
        let mut repo = MockEventRepository::new();
        repo.expect_update()
            .withf(|e| e.id == 3 && e.topic == "New topic")
            .times(1)
            .returning(|_| Ok(1));

        let body = EventDto {
            id: Some(999),
            ..dto("New topic", "New organizer", at(2025, 6, 15, 18))
        };

        assert_ok!(mock_service(repo).update(3, &body).await);
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let service = memory_service();
        let first = service
            .save(dto("Old topic", "Old organizer", at(2020, 1, 1, 0)))
            .await
            .unwrap();
        let other = service
            .save(dto("Other topic", "Other organizer", at(2021, 1, 1, 0)))
            .await
            .unwrap();
        let id = first.id.unwrap();

        let replacement = EventDto {
            id: other.id,
            ..dto("New topic", "New organizer", at(2025, 6, 15, 18))
        };
        service.update(id, &replacement).await.unwrap();

        assert_eq!(service.get_by_id(id).await.unwrap(), replacement);
        let untouched = service.get_by_id(other.id.unwrap()).await.unwrap();
        assert_eq!(untouched.topic.as_deref(), Some("Other topic"));
    }
}
