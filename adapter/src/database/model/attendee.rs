use kernel::model::{
    attendee::Attendee,
    id::{AttendeeId, EventId, UserId},
};

#[derive(sqlx::FromRow)]
pub struct AttendeeRow {
    pub attendee_id: AttendeeId,
    pub event_id: EventId,
    pub user_id: UserId,
}

impl From<AttendeeRow> for Attendee {
    fn from(value: AttendeeRow) -> Self {
        let AttendeeRow {
            attendee_id,
            event_id,
            user_id,
        } = value;
        Attendee {
            id: attendee_id,
            event_id,
            user_id,
        }
    }
}
