use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee entity - a row of the `employee` table.
///
/// The default value is the zero employee (`emp_id` 0, empty strings,
/// salary 0), returned when a lookup by id finds nothing.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(table_name = "employee")]
#[schema(as = Employee)]
pub struct Model {
    /// Assigned by storage on insert; never changes afterwards.
    #[sea_orm(primary_key, column_name = "empid")]
    #[schema(read_only)]
    pub emp_id: i32,

    #[sea_orm(column_name = "empname")]
    pub emp_name: String,

    #[sea_orm(column_name = "emprole")]
    pub emp_role: String,

    #[sea_orm(column_name = "empsalary")]
    pub emp_salary: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
