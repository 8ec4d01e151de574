use utoipa::OpenApi;

use crate::controllers::employees::EmployeePayload;
use crate::error::{ErrorDetail, ErrorResponse, FieldError};
use crate::models::employee;

/// OpenAPI documentation for the employee endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee API",
        version = "0.1.0",
        description = "CRUD operations over the employee table."
    ),
    paths(
        crate::controllers::employees::list_employees,
        crate::controllers::employees::get_employee,
        crate::controllers::employees::create_employee,
        crate::controllers::employees::update_employee,
        crate::controllers::employees::delete_employee,
    ),
    components(
        schemas(
            employee::Model,
            EmployeePayload,
            ErrorResponse,
            ErrorDetail,
            FieldError,
        )
    ),
    tags(
        (name = "employees", description = "Employee CRUD endpoints")
    )
)]
pub struct ApiDoc;
