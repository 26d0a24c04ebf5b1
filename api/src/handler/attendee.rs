use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use kernel::{
    model::{
        attendee::command::{CreateAttendee, DeleteAttendee},
        id::{EventId, UserId},
    },
    policy::EventAction,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use super::event::{authorize, load_event};
use crate::{
    extractor::AuthorizedUser,
    model::{attendee::AttendeeResponse, user::UserResponse},
};

pub async fn add_attendee(
    user: AuthorizedUser,
    WithRejection(Path((event_id, user_id)), _): WithRejection<Path<(EventId, UserId)>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<(StatusCode, Json<AttendeeResponse>)> {
    let event = load_event(&registry, event_id).await?;
    let user_to_add = registry
        .user_repository()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("User not found".into()))?;
    authorize(&user, &event, EventAction::AddAttendee)?;

    // Fast path only; the store rejects a racing duplicate on insert as well
    if registry
        .attendee_repository()
        .find_by_event_and_user(event.id, user_to_add.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Attendee already exists".into()));
    }

    let attendee = registry
        .attendee_repository()
        .create(CreateAttendee::new(event.id, user_to_add.id))
        .await?;
    tracing::info!(
        event.id = %attendee.event_id,
        user.id = %attendee.user_id,
        "attendee added"
    );

    Ok((StatusCode::CREATED, Json(attendee.into())))
}

pub async fn show_attendee_list(
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<UserResponse>>> {
    registry
        .attendee_repository()
        .find_users_by_event(event_id)
        .await
        .map(|users| users.into_iter().map(UserResponse::from).collect())
        .map(Json)
}

pub async fn remove_attendee(
    user: AuthorizedUser,
    WithRejection(Path((event_id, user_id)), _): WithRejection<Path<(EventId, UserId)>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let event = load_event(&registry, event_id).await?;
    authorize(&user, &event, EventAction::RemoveAttendee)?;

    registry
        .attendee_repository()
        .delete(DeleteAttendee::new(event.id, user_id))
        .await?;
    tracing::info!(event.id = %event.id, user.id = %user_id, "attendee removed");

    Ok(StatusCode::NO_CONTENT)
}
