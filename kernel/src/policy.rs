//! Ownership rules for mutating events and their attendee lists.
//!
//! Every rule is evaluated after the target event has been loaded and before
//! any write reaches the store. Read operations have no rule here: anybody
//! may read events and attendee lists.

use shared::error::{AppError, AppResult};

use crate::model::{event::Event, id::UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Update,
    Delete,
    AddAttendee,
    RemoveAttendee,
}

impl EventAction {
    fn denial_message(self) -> &'static str {
        match self {
            EventAction::Update => "You are not authorized to update this event",
            EventAction::Delete => "You are not authorized to delete this event",
            EventAction::AddAttendee => "You are not authorized to add attendees to this event",
            EventAction::RemoveAttendee => {
                "You are not authorized to remove attendees from this event"
            }
        }
    }
}

/// Only the owner of `event` may perform any [`EventAction`] on it.
pub fn authorize(actor: UserId, event: &Event, action: EventAction) -> AppResult<()> {
    if event.is_owned_by(actor) {
        Ok(())
    } else {
        Err(AppError::ForbiddenOperation(
            action.denial_message().to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{event::date::EventDate, id::EventId};

    fn owned_by(owner: i64) -> Event {
        Event {
            id: EventId::new(10),
            owner_id: UserId::new(owner),
            name: "Meetup".into(),
            description: "Monthly get-together".into(),
            date: EventDate::parse("2025-06-26").unwrap(),
            location: "Downtown".into(),
        }
    }

    #[test]
    fn owner_is_allowed_every_action() {
        let event = owned_by(1);
        for action in [
            EventAction::Update,
            EventAction::Delete,
            EventAction::AddAttendee,
            EventAction::RemoveAttendee,
        ] {
            assert!(authorize(UserId::new(1), &event, action).is_ok());
        }
    }

    #[test]
    fn non_owner_is_forbidden() {
        let event = owned_by(1);
        let err = authorize(UserId::new(2), &event, EventAction::Update).unwrap_err();
        assert!(matches!(err, AppError::ForbiddenOperation(_)));
        assert_eq!(err.to_string(), "You are not authorized to update this event");
    }
}
