use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    attendee::{
        command::{CreateAttendee, DeleteAttendee},
        Attendee,
    },
    id::{EventId, UserId},
    user::User,
};

#[async_trait]
pub trait AttendeeRepository: Send + Sync {
    // Fails with a conflict when the (event, user) pair is already registered
    async fn create(&self, event: CreateAttendee) -> AppResult<Attendee>;
    async fn find_by_event_and_user(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> AppResult<Option<Attendee>>;
    async fn find_users_by_event(&self, event_id: EventId) -> AppResult<Vec<User>>;
    // Removing a pair that is not registered is not an error
    async fn delete(&self, event: DeleteAttendee) -> AppResult<()>;
}
