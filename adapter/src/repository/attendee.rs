use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    attendee::{
        command::{CreateAttendee, DeleteAttendee},
        Attendee,
    },
    id::{EventId, UserId},
    user::User,
};
use kernel::repository::attendee::AttendeeRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    is_unique_violation,
    model::{attendee::AttendeeRow, user::UserRow},
    ConnectionPool,
};

#[derive(new)]
pub struct AttendeeRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AttendeeRepository for AttendeeRepositoryImpl {
    async fn create(&self, event: CreateAttendee) -> AppResult<Attendee> {
        // The UNIQUE (event_id, user_id) constraint settles concurrent
        // registrations that both got past the caller's pre-check.
        let res = self
            .db
            .deadline(
                sqlx::query_as::<_, AttendeeRow>(
                    r#"
                        INSERT INTO attendees (event_id, user_id)
                        VALUES ($1, $2)
                        RETURNING attendee_id, event_id, user_id
                    "#,
                )
                .bind(event.event_id)
                .bind(event.user_id)
                .fetch_one(self.db.inner_ref()),
            )
            .await?;

        match res {
            Ok(row) => Ok(Attendee::from(row)),
            Err(e) if is_unique_violation(&e) => {
                Err(AppError::Conflict("Attendee already exists".into()))
            }
            Err(e) => Err(AppError::SpecificOperationError(e)),
        }
    }

    async fn find_by_event_and_user(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> AppResult<Option<Attendee>> {
        let row = self
            .db
            .run(
                sqlx::query_as::<_, AttendeeRow>(
                    r#"
                        SELECT attendee_id, event_id, user_id
                        FROM attendees
                        WHERE event_id = $1 AND user_id = $2
                    "#,
                )
                .bind(event_id)
                .bind(user_id)
                .fetch_optional(self.db.inner_ref()),
            )
            .await?;

        Ok(row.map(Attendee::from))
    }

    async fn find_users_by_event(&self, event_id: EventId) -> AppResult<Vec<User>> {
        let rows = self
            .db
            .run(
                sqlx::query_as::<_, UserRow>(
                    r#"
                        SELECT u.user_id, u.name, u.email
                        FROM users AS u
                        INNER JOIN attendees AS a ON a.user_id = u.user_id
                        WHERE a.event_id = $1
                        ORDER BY a.attendee_id ASC
                    "#,
                )
                .bind(event_id)
                .fetch_all(self.db.inner_ref()),
            )
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn delete(&self, event: DeleteAttendee) -> AppResult<()> {
        // Zero affected rows means the pair was never registered, which is fine
        self.db
            .run(
                sqlx::query("DELETE FROM attendees WHERE event_id = $1 AND user_id = $2")
                    .bind(event.event_id)
                    .bind(event.user_id)
                    .execute(self.db.inner_ref()),
            )
            .await?;

        Ok(())
    }
}
