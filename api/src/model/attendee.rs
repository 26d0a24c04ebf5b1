use kernel::model::{
    attendee::Attendee,
    id::{AttendeeId, EventId, UserId},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeResponse {
    pub id: AttendeeId,
    pub event_id: EventId,
    pub user_id: UserId,
}

impl From<Attendee> for AttendeeResponse {
    fn from(value: Attendee) -> Self {
        let Attendee {
            id,
            event_id,
            user_id,
        } = value;
        Self {
            id,
            event_id,
            user_id,
        }
    }
}
