//! In-memory events repository, used by tests and database-less runs

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    filter::{self, FilterCriteria},
    EventRepository,
};
use crate::{error::AppResult, models::Event};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    events: BTreeMap<i64, Event>,
}

/// Events keyed by id; listing order is insertion order
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Event>> {
        let store = self.store.read().await;
        Ok(store.events.get(&id).cloned())
    }

    async fn save(&self, mut event: Event) -> AppResult<Event> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        event.id = store.next_id;
        store.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_all(&self) -> AppResult<Vec<Event>> {
        let store = self.store.read().await;
        Ok(store.events.values().cloned().collect())
    }

    async fn update(&self, event: &Event) -> AppResult<u64> {
        let mut store = self.store.write().await;
        match store.events.get_mut(&event.id) {
            Some(existing) => {
                *existing = event.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<u64> {
        let mut store = self.store.write().await;
        Ok(store.events.remove(&id).map_or(0, |_| 1))
    }

    async fn get_all_by_filter(&self, criteria: &FilterCriteria) -> AppResult<Vec<Event>> {
        let store = self.store.read().await;
        Ok(filter::apply(store.events.values().cloned(), criteria))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
