use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::ApiError;

/// The `{emp_id}` path segment, parsed as an employee primary key.
///
/// ```rust,ignore
/// async fn get_employee(EmployeeId(id): EmployeeId) -> impl IntoResponse { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeId(pub i32);

impl EmployeeId {
    /// Parse a raw path segment. Surrounding whitespace is not accepted.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        raw.parse::<i32>().map(EmployeeId).map_err(|_| {
            ApiError::BadRequest(format!("Invalid employee id '{}': expected an integer", raw))
        })
    }
}

impl<S> FromRequestParts<S> for EmployeeId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        EmployeeId::parse(&raw)
    }
}
