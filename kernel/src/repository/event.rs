use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    event::{command::CreateEvent, Event},
    id::{EventId, UserId},
};

#[async_trait]
pub trait EventRepository: Send + Sync {
    // Inserts the event and returns it with its assigned id
    async fn create(&self, event: CreateEvent) -> AppResult<Event>;
    async fn find_all(&self) -> AppResult<Vec<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    // Events the given user is registered for as an attendee
    async fn find_by_attendee(&self, user_id: UserId) -> AppResult<Vec<Event>>;
    // Persists name/description/date/location; id and owner are left alone
    async fn update(&self, event: &Event) -> AppResult<()>;
    async fn delete(&self, event_id: EventId) -> AppResult<()>;
}
