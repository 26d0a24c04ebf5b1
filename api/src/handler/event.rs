use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::{
    model::{
        event::Event,
        id::{EventId, UserId},
    },
    policy::{self, EventAction},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::event::{
        CreateEventRequest, CreateEventRequestWithOwner, EventResponse, UpdateEventRequest,
    },
};

pub(crate) async fn load_event(registry: &AppRegistry, event_id: EventId) -> AppResult<Event> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Event not found".into()))
}

pub(crate) fn authorize(
    user: &AuthorizedUser,
    event: &Event,
    action: EventAction,
) -> AppResult<()> {
    policy::authorize(user.id(), event, action).inspect_err(|_| {
        tracing::warn!(
            event.id = %event.id,
            user.id = %user.id(),
            action = ?action,
            "denied operation on event owned by another user"
        )
    })
}

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateEventRequest>, AppError>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    req.validate(&())?;

    let event = registry
        .event_repository()
        .create(CreateEventRequestWithOwner::new(user.id(), req).into())
        .await?;
    tracing::info!(event.id = %event.id, owner.id = %event.owner_id, "event created");

    Ok((StatusCode::CREATED, Json(event.into())))
}

pub async fn show_event_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<EventResponse>>> {
    registry
        .event_repository()
        .find_all()
        .await
        .map(|events| events.into_iter().map(EventResponse::from).collect())
        .map(Json)
}

pub async fn show_event(
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    load_event(&registry, event_id)
        .await
        .map(EventResponse::from)
        .map(Json)
}

pub async fn update_event(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(body), _): WithRejection<Json<serde_json::Value>, AppError>,
) -> AppResult<Json<EventResponse>> {
    let mut event = load_event(&registry, event_id).await?;
    authorize(&user, &event, EventAction::Update)?;
    // Field errors are only reported to the owner of an existing event.
    let req: UpdateEventRequest = serde_json::from_value(body)
        .map_err(|e| AppError::InvalidRequest(format!("Invalid event fields: {e}")))?;
    req.validate(&())?;

    event.apply(req.into());
    registry.event_repository().update(&event).await?;
    tracing::info!(event.id = %event.id, "event updated");

    Ok(Json(event.into()))
}

pub async fn delete_event(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let event = load_event(&registry, event_id).await?;
    authorize(&user, &event, EventAction::Delete)?;

    registry.event_repository().delete(event.id).await?;
    tracing::info!(event.id = %event.id, "event deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn show_events_by_attendee(
    WithRejection(Path(user_id), _): WithRejection<Path<UserId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<EventResponse>>> {
    registry
        .event_repository()
        .find_by_attendee(user_id)
        .await
        .map(|events| events.into_iter().map(EventResponse::from).collect())
        .map(Json)
}
