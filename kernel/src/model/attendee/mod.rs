use crate::model::id::{AttendeeId, EventId, UserId};

pub mod command;

/// Registration of a user for an event. At most one per (event, user) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub id: AttendeeId,
    pub event_id: EventId,
    pub user_id: UserId,
}
