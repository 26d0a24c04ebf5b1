use derive_new::new;

use crate::model::id::{EventId, UserId};

#[derive(Debug, new)]
pub struct CreateAttendee {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, new)]
pub struct DeleteAttendee {
    pub event_id: EventId,
    pub user_id: UserId,
}
