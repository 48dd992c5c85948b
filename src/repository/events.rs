//! PostgreSQL events repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{
    filter::{self, FilterCriteria},
    EventRepository,
};
use crate::{error::AppResult, models::Event};

const COLUMNS: &str = r#"id, topic, description, organizer, "date", location"#;

#[derive(Clone)]
pub struct PgEventRepository {
    pool: Pool<Postgres>,
}

impl PgEventRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    /// Get event by ID
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Event>> {
        let query = format!("SELECT {} FROM event WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create an event
    async fn save(&self, event: Event) -> AppResult<Event> {
        let query = format!(
            r#"
            INSERT INTO event (topic, description, organizer, "date", location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        );

        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Event>(&query)
            .bind(&event.topic)
            .bind(&event.description)
            .bind(&event.organizer)
            .bind(event.date)
            .bind(&event.location)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(row)
    }

    /// List all events
    async fn get_all(&self) -> AppResult<Vec<Event>> {
        let query = format!("SELECT {} FROM event", COLUMNS);
        let rows = sqlx::query_as::<_, Event>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Update an event
    async fn update(&self, event: &Event) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r#"
            UPDATE event
            SET topic = $1, description = $2, organizer = $3, "date" = $4, location = $5
            WHERE id = $6
            "#,
        )
        .bind(&event.topic)
        .bind(&event.description)
        .bind(&event.organizer)
        .bind(event.date)
        .bind(&event.location)
        .bind(event.id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Delete an event
    async fn delete(&self, id: i64) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM event WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// List events matching the criteria, ordered by its sort keys
    async fn get_all_by_filter(&self, criteria: &FilterCriteria) -> AppResult<Vec<Event>> {
        let query = format!(
            r#"SELECT {} FROM event WHERE "date" BETWEEN $1 AND $2 AND organizer LIKE $3 AND topic LIKE $4{}"#,
            COLUMNS,
            filter::order_by_clause(&criteria.sort_keys())
        );
        tracing::debug!("Filter query: {}", query);

        let rows = sqlx::query_as::<_, Event>(&query)
            .bind(criteria.from)
            .bind(criteria.to)
            .bind(filter::like_pattern(&criteria.organizer))
            .bind(filter::like_pattern(&criteria.topic))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
