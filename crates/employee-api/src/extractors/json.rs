use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON extractor that reports failures through [`ApiError`].
///
/// Unlike `axum::Json` it does not insist on a `Content-Type` header, so
/// clients that post raw JSON bodies keep working. The body is subject to
/// axum's `DefaultBodyLimit` (2 MiB unless overridden); larger bodies are
/// rejected with 413.
///
/// Usage in handlers:
/// ```rust,ignore
/// async fn create_employee(Json(payload): Json<EmployeePayload>) -> impl IntoResponse {
///     // payload is deserialized from request body
/// }
/// ```
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge(rejection.body_text())
            } else {
                ApiError::BadRequest(format!("Failed to read body: {}", rejection.body_text()))
            }
        })?;

        let value: T = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Validation(format!("Invalid JSON: {}", e)))?;

        Ok(Json(value))
    }
}

impl<T: serde::Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => (
                StatusCode::OK,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                bytes,
            )
                .into_response(),
            Err(e) => ApiError::Internal(format!("Failed to encode response: {}", e)).into_response(),
        }
    }
}
