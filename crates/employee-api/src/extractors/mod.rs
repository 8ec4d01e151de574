pub mod employee_id;
pub mod json;

pub use employee_id::EmployeeId;
pub use json::Json;
