//! Repository for the `employees` table.

use sqlx::PgPool;

use appraise_core::types::DbId;

use crate::models::employee::{CreateEmployee, Employee};

/// Column list for `employees` queries.
const COLUMNS: &str = "id, name, email, role_label, role_level, created_at, updated_at";

/// Provides lookup and creation for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (name, email, role_label, role_level)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role_label)
            .bind(input.role_level)
            .fetch_one(pool)
            .await
    }

    /// Find an employee by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
