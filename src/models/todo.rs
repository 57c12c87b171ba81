use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for creating or replacing a todo.
/// Contains validation rules for its fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TodoRequest {
    /// The title of the todo. At least 3 characters.
    #[validate(length(min = 3))]
    pub title: String,

    /// Between 3 and 100 characters.
    #[validate(length(min = 3, max = 100))]
    pub description: String,

    /// 1 (lowest) through 5 (highest).
    #[validate(range(min = 1, max = 5))]
    pub priority: i32,

    pub complete: bool,
}

/// Represents a todo as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub complete: bool,
    /// Identifier of the user who owns the todo.
    pub owner_id: i64,
}
