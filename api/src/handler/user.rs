use axum::Json;

use crate::{extractor::AuthorizedUser, model::user::UserResponse};

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(user.user.into())
}
