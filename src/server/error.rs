use std::any::Any;
use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Every failure a handler can report. Each variant is rendered as the
/// `{success, error, message}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request sent")]
    BadRequest,
    #[error("Data could not be found")]
    NotFound,
    #[error("Could not be processed")]
    Unprocessable,
    #[error("Internal server error")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    /// Logs the underlying failure and turns it into a 422.
    pub fn unprocessable(error: impl Display) -> Self {
        tracing::error!(%error, "Request could not be processed");
        ApiError::Unprocessable
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(error) = &self {
            tracing::error!(%error, "Storage failure");
        }
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Used by `CatchPanicLayer` so a panicking handler still answers with the
/// 500 envelope.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(%detail, "Handler panicked");
    ApiError::Internal.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_envelope() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_of(response).await,
            serde_json::json!({"success": false, "error": 404, "message": "Data could not be found"})
        );
    }

    #[tokio::test]
    async fn storage_errors_are_internal() {
        let response = ApiError::from(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body["error"], 500);
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn panics_become_internal_errors() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await["success"], false);
    }

    #[test]
    fn statuses() {
        assert_eq!(ApiError::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::unprocessable("constraint failed").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
