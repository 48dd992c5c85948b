//! Repository layer for event persistence

pub mod events;
pub mod filter;
pub mod memory;

use async_trait::async_trait;

use crate::{error::AppResult, models::Event};

pub use events::PgEventRepository;
pub use filter::FilterCriteria;
pub use memory::InMemoryEventRepository;

/// Storage operations on events.
///
/// Every write is atomic: it either applies fully or leaves the store untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Event>>;

    /// Insert `event`, ignoring its id, and return it with the assigned id
    async fn save(&self, event: Event) -> AppResult<Event>;

    async fn get_all(&self) -> AppResult<Vec<Event>>;

    /// Overwrite every field of the row with `event.id`; number of rows
    /// changed (0 when the row is gone)
    async fn update(&self, event: &Event) -> AppResult<u64>;

    /// Number of rows removed (0 or 1)
    async fn delete(&self, id: i64) -> AppResult<u64>;

    async fn get_all_by_filter(&self, criteria: &FilterCriteria) -> AppResult<Vec<Event>>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}
