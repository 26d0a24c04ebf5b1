use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::{command::CreateEvent, Event},
    id::{EventId, UserId},
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::event::EventRow, ConnectionPool};

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<Event> {
        let row = self
            .db
            .run(
                sqlx::query_as::<_, EventRow>(
                    r#"
                        INSERT INTO events (owner_id, name, description, date, location)
                        VALUES ($1, $2, $3, $4, $5)
                        RETURNING event_id, owner_id, name, description, date, location
                    "#,
                )
                .bind(event.owner_id)
                .bind(event.name)
                .bind(event.description)
                .bind(event.date.into_inner())
                .bind(event.location)
                .fetch_one(self.db.inner_ref()),
            )
            .await?;

        Ok(Event::from(row))
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let rows = self
            .db
            .run(
                sqlx::query_as::<_, EventRow>(
                    r#"
                        SELECT event_id, owner_id, name, description, date, location
                        FROM events
                        ORDER BY event_id ASC
                    "#,
                )
                .fetch_all(self.db.inner_ref()),
            )
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row = self
            .db
            .run(
                sqlx::query_as::<_, EventRow>(
                    r#"
                        SELECT event_id, owner_id, name, description, date, location
                        FROM events
                        WHERE event_id = $1
                    "#,
                )
                .bind(event_id)
                .fetch_optional(self.db.inner_ref()),
            )
            .await?;

        Ok(row.map(Event::from))
    }

    async fn find_by_attendee(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        let rows = self
            .db
            .run(
                sqlx::query_as::<_, EventRow>(
                    r#"
                        SELECT e.event_id, e.owner_id, e.name, e.description, e.date, e.location
                        FROM events AS e
                        INNER JOIN attendees AS a ON a.event_id = e.event_id
                        WHERE a.user_id = $1
                        ORDER BY e.event_id ASC
                    "#,
                )
                .bind(user_id)
                .fetch_all(self.db.inner_ref()),
            )
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn update(&self, event: &Event) -> AppResult<()> {
        // owner_id is deliberately absent from the SET list
        let res = self
            .db
            .run(
                sqlx::query(
                    r#"
                        UPDATE events
                        SET name = $1, description = $2, date = $3, location = $4
                        WHERE event_id = $5
                    "#,
                )
                .bind(&event.name)
                .bind(&event.description)
                .bind(event.date.into_inner())
                .bind(&event.location)
                .bind(event.id)
                .execute(self.db.inner_ref()),
            )
            .await?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Event not found".into()));
        }

        Ok(())
    }

    async fn delete(&self, event_id: EventId) -> AppResult<()> {
        let res = self
            .db
            .run(
                sqlx::query("DELETE FROM events WHERE event_id = $1")
                    .bind(event_id)
                    .execute(self.db.inner_ref()),
            )
            .await?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Event not found".into()));
        }

        Ok(())
    }
}
