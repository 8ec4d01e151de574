use axum::Router;

use crate::controllers::{employees, AppState};

/// Build the application routes.
///
/// `/employees` and `/employees/{emp_id}` carry the five CRUD operations;
/// anything else falls through to axum's 404/405 handling.
pub fn build_routes() -> Router<AppState> {
    Router::new().merge(employees::routes())
}
