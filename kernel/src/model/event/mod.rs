use crate::model::id::{EventId, UserId};

pub mod command;
pub mod date;

use command::UpdateEvent;
use date::EventDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub date: EventDate,
    pub location: String,
}

impl Event {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Copies the fields present in `update` onto this event. The id and the
    /// owner are never touched.
    pub fn apply(&mut self, update: UpdateEvent) {
        let UpdateEvent {
            name,
            description,
            date,
            location,
        } = update;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(location) = location {
            self.location = location;
        }
    }
}
