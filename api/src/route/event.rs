use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    attendee::{add_attendee, remove_attendee, show_attendee_list},
    event::{
        delete_event, register_event, show_event, show_event_list, show_events_by_attendee,
        update_event,
    },
};

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new()
        .route("/", post(register_event).get(show_event_list))
        .route(
            "/:event_id",
            get(show_event).put(update_event).delete(delete_event),
        )
        .route("/:event_id/attendees", get(show_attendee_list))
        .route(
            "/:event_id/attendees/:user_id",
            post(add_attendee).delete(remove_attendee),
        );

    let attendees_routers = Router::new().route("/:user_id/events", get(show_events_by_attendee));

    Router::new()
        .nest("/events", events_routers)
        .nest("/attendees", attendees_routers)
}
