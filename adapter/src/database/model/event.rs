use kernel::model::{
    event::Event,
    id::{EventId, UserId},
};
use sqlx::types::chrono::NaiveDate;

#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            owner_id,
            name,
            description,
            date,
            location,
        } = value;
        Event {
            id: event_id,
            owner_id,
            name,
            description,
            date: date.into(),
            location,
        }
    }
}
