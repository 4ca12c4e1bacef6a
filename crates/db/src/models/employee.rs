//! Employee models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use appraise_core::types::{DbId, Timestamp};

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role_label: String,
    pub role_level: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new employee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub email: String,
    pub role_label: String,
    pub role_level: i16,
}
