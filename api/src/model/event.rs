use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        command::{CreateEvent, UpdateEvent},
        date::EventDate,
        Event,
    },
    id::{EventId, UserId},
};
use serde::{Deserialize, Serialize};

// `id` and `ownerId` may be present in the body but are never read
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(chars, min = 3))]
    pub name: String,
    #[garde(length(chars, min = 10))]
    pub description: String,
    #[garde(skip)]
    pub date: EventDate,
    #[garde(length(chars, min = 3))]
    pub location: String,
}

#[derive(new)]
pub struct CreateEventRequestWithOwner(UserId, CreateEventRequest);

impl From<CreateEventRequestWithOwner> for CreateEvent {
    fn from(value: CreateEventRequestWithOwner) -> Self {
        let CreateEventRequestWithOwner(
            owner_id,
            CreateEventRequest {
                name,
                description,
                date,
                location,
            },
        ) = value;
        CreateEvent {
            owner_id,
            name,
            description,
            date,
            location,
        }
    }
}

// Every field is optional, absent ones keep their stored value
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(length(chars, min = 3))]
    pub name: Option<String>,
    #[garde(length(chars, min = 10))]
    pub description: Option<String>,
    #[garde(skip)]
    pub date: Option<EventDate>,
    #[garde(length(chars, min = 3))]
    pub location: Option<String>,
}

impl From<UpdateEventRequest> for UpdateEvent {
    fn from(value: UpdateEventRequest) -> Self {
        let UpdateEventRequest {
            name,
            description,
            date,
            location,
        } = value;
        UpdateEvent {
            name,
            description,
            date,
            location,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub date: EventDate,
    pub location: String,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            id,
            owner_id,
            name,
            description,
            date,
            location,
        } = value;
        Self {
            id,
            owner_id,
            name,
            description,
            date,
            location,
        }
    }
}
