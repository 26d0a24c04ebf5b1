use derive_new::new;

use super::date::EventDate;
use crate::model::id::UserId;

#[derive(Debug, new)]
pub struct CreateEvent {
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub date: EventDate,
    pub location: String,
}

/// Allow-listed fields a client may change on an existing event.
#[derive(Debug, Default)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<EventDate>,
    pub location: Option<String>,
}
