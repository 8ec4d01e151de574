use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::controllers::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::extractors::{EmployeeId, Json};
use crate::models::employee::{self, Entity as Employee};

pub const CREATED_MESSAGE: &str = "New user was created";
pub const UPDATED_MESSAGE: &str = "Employee details updated successfully!";

// ── Request types ──

/// Salary as sent by clients: either a JSON number or a decimal string.
///
/// Any other JSON value lands in `Other` so it is reported against
/// `emp_salary` instead of failing the whole body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SalaryInput {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl SalaryInput {
    /// Parse into a salary that fits the `empsalary` column.
    pub fn parse(&self) -> Result<i32, ApiError> {
        let parsed = match self {
            SalaryInput::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            SalaryInput::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(ApiError::field("emp_salary", "is required"));
                }
                s.parse::<i32>().ok()
            }
            SalaryInput::Other(_) => {
                return Err(ApiError::field(
                    "emp_salary",
                    "must be a number or a numeric string",
                ));
            }
        };
        parsed.ok_or_else(|| ApiError::field("emp_salary", "must be a 32-bit whole number"))
    }
}

/// Body of create and update requests.
///
/// Name and role default to the empty string when omitted; the salary
/// must always be present.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct EmployeePayload {
    #[schema(example = "Alice")]
    pub emp_name: String,

    #[schema(example = "Engineer")]
    pub emp_role: String,

    #[schema(value_type = Option<String>, example = "5000")]
    pub emp_salary: Option<SalaryInput>,
}

/// A payload whose salary has been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: String,
    pub role: String,
    pub salary: i32,
}

impl EmployeePayload {
    pub fn into_fields(self) -> Result<EmployeeFields, ApiError> {
        let salary = match &self.emp_salary {
            Some(input) => input.parse()?,
            None => return Err(ApiError::field("emp_salary", "is required")),
        };
        Ok(EmployeeFields {
            name: self.emp_name,
            role: self.emp_role,
            salary,
        })
    }
}

// ── Routes ──

/// Employee routes. OPTIONS on either path is answered by the CORS layer
/// before it reaches the router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{emp_id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

// ── Handlers ──

/// List every employee in storage order.
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees", body = Vec<employee::Model>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<employee::Model>>, ApiError> {
    let employees = Employee::find().all(&state.db).await?;
    tracing::debug!(count = employees.len(), "listed employees");
    Ok(Json(employees))
}

/// Get one employee. A missing id yields the zero-valued employee.
#[utoipa::path(
    get,
    path = "/employees/{emp_id}",
    params(
        ("emp_id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee, or the zero employee when absent", body = employee::Model),
        (status = 400, description = "Non-integer id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    EmployeeId(id): EmployeeId,
) -> Result<Json<employee::Model>, ApiError> {
    let found = Employee::find_by_id(id).one(&state.db).await?;
    if found.is_none() {
        tracing::debug!(emp_id = id, "employee not found, returning zero value");
    }
    Ok(Json(found.unwrap_or_default()))
}

/// Insert a new employee; storage assigns the id.
#[utoipa::path(
    post,
    path = "/employees",
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Employee created", body = String, content_type = "text/plain"),
        (status = 413, description = "Body over the 2 MiB limit", body = ErrorResponse),
        (status = 422, description = "Malformed JSON or salary", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<EmployeePayload>,
) -> Result<&'static str, ApiError> {
    let fields = payload.into_fields()?;

    let new_employee = employee::ActiveModel {
        emp_name: Set(fields.name),
        emp_role: Set(fields.role),
        emp_salary: Set(fields.salary),
        ..Default::default()
    };

    let inserted = Employee::insert(new_employee).exec(&state.db).await?;
    tracing::info!(emp_id = inserted.last_insert_id, "employee created");
    Ok(CREATED_MESSAGE)
}

/// Replace name, role and salary of one employee.
///
/// Succeeds even when no row has the id.
#[utoipa::path(
    put,
    path = "/employees/{emp_id}",
    params(
        ("emp_id" = i32, Path, description = "Employee ID")
    ),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Update applied (possibly to zero rows)", body = String, content_type = "text/plain"),
        (status = 400, description = "Non-integer id", body = ErrorResponse),
        (status = 413, description = "Body over the 2 MiB limit", body = ErrorResponse),
        (status = 422, description = "Malformed JSON or salary", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    EmployeeId(id): EmployeeId,
    Json(payload): Json<EmployeePayload>,
) -> Result<&'static str, ApiError> {
    let fields = payload.into_fields()?;

    let result = Employee::update_many()
        .col_expr(employee::Column::EmpName, Expr::value(fields.name))
        .col_expr(employee::Column::EmpRole, Expr::value(fields.role))
        .col_expr(employee::Column::EmpSalary, Expr::value(fields.salary))
        .filter(employee::Column::EmpId.eq(id))
        .exec(&state.db)
        .await?;

    tracing::info!(emp_id = id, rows_affected = result.rows_affected, "employee updated");
    Ok(UPDATED_MESSAGE)
}

/// Delete one employee. Deleting a missing id is not an error.
///
/// The confirmation echoes the id segment exactly as requested.
#[utoipa::path(
    delete,
    path = "/employees/{emp_id}",
    params(
        ("emp_id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Delete applied (possibly to zero rows)", body = String, content_type = "text/plain"),
        (status = 400, description = "Non-integer id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<String, ApiError> {
    let EmployeeId(id) = EmployeeId::parse(&raw_id)?;

    let result = Employee::delete_by_id(id).exec(&state.db).await?;
    tracing::info!(emp_id = id, rows_affected = result.rows_affected, "employee deleted");
    Ok(format!("User with ID = {} was deleted", raw_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> EmployeePayload {
        serde_json::from_str(json).unwrap()
    }

    fn field_of(err: ApiError) -> String {
        match err {
            ApiError::ValidationErrors(errs) => errs[0].field.clone(),
            other => panic!("expected field error, got {:?}", other),
        }
    }

    #[test]
    fn test_string_salary_is_parsed() {
        let fields = payload(r#"{"emp_name":"Alice","emp_role":"Engineer","emp_salary":"5000"}"#)
            .into_fields()
            .unwrap();

        assert_eq!(
            fields,
            EmployeeFields {
                name: "Alice".into(),
                role: "Engineer".into(),
                salary: 5000,
            }
        );
    }

    #[test]
    fn test_numeric_salary_and_padding_are_accepted() {
        assert_eq!(payload(r#"{"emp_salary":7200}"#).into_fields().unwrap().salary, 7200);
        assert_eq!(payload(r#"{"emp_salary":" 42 "}"#).into_fields().unwrap().salary, 42);
    }

    #[test]
    fn test_missing_names_default_to_empty() {
        let fields = payload(r#"{"emp_salary":"1"}"#).into_fields().unwrap();
        assert_eq!(fields.name, "");
        assert_eq!(fields.role, "");
    }

    #[test]
    fn test_bad_salaries_are_field_errors() {
        for body in [
            r#"{"emp_name":"Bob"}"#,
            r#"{"emp_salary":null}"#,
            r#"{"emp_salary":""}"#,
            r#"{"emp_salary":"lots"}"#,
            r#"{"emp_salary":"12.5"}"#,
            r#"{"emp_salary":12.5}"#,
            r#"{"emp_salary":3000000000}"#,
            r#"{"emp_salary":true}"#,
            r#"{"emp_salary":{}}"#,
            r#"{"emp_salary":[5000]}"#,
        ] {
            let err = payload(body).into_fields().unwrap_err();
            assert_eq!(field_of(err), "emp_salary", "body {}", body);
        }
    }
}
