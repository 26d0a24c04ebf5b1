use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid email or password")]
    UnauthenticatedError,
    #[error("Unauthorized access")]
    UnauthorizedError,
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("An error occurred while running a database operation")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("Store call exceeded its deadline")]
    StoreTimeout(#[from] tokio::time::error::Elapsed),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("Blocking task failed: {0}")]
    BlockingTaskError(#[from] tokio::task::JoinError),
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            AppError::SpecificOperationError(_)
            | AppError::StoreTimeout(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::BlockingTaskError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        // Store and infrastructure failures are logged in full but only a
        // generic message reaches the caller.
        let message = if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status_code, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// Malformed path ids and request bodies surface as 400 with the usual error body
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_carry_their_message() {
        let (status, body) = body_of(AppError::EntityNotFound("Event not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Event not found" }));

        let (status, body) = body_of(AppError::Conflict("Attendee already exists".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Attendee already exists");
    }

    #[tokio::test]
    async fn store_errors_are_masked() {
        let (status, body) =
            body_of(AppError::SpecificOperationError(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");

        let elapsed = tokio::time::timeout(
            std::time::Duration::from_millis(1),
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();
        let (status, body) = body_of(AppError::StoreTimeout(elapsed)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[test]
    fn ownership_and_authentication_failures_map_consistently() {
        assert_eq!(
            AppError::ForbiddenOperation("nope".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::UnauthorizedError.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::UnauthenticatedError.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
