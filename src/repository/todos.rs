use log::{debug, info};

use crate::auth::Identity;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{Todo, TodoRequest};
use crate::validation::Valid;

/// Owner-scoped access to the `todos` table.
///
/// Every method taking an [`Identity`] filters on `owner_id`, so a todo owned by
/// someone else is indistinguishable from one that does not exist. The
/// unscoped methods are for admin routes only.
pub struct TodoRepository<'a> {
    pool: &'a DbPool,
}

fn not_found() -> AppError {
    AppError::NotFound("Todo not found.".into())
}

impl<'a> TodoRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_owner(&self, identity: &Identity) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, priority, complete, owner_id
             FROM todos WHERE owner_id = ? ORDER BY id",
        )
        .bind(identity.user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(todos)
    }

    pub async fn list_all(&self) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, priority, complete, owner_id FROM todos ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(todos)
    }

    pub async fn get(&self, identity: &Identity, id: i64) -> Result<Todo, AppError> {
        sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, priority, complete, owner_id
             FROM todos WHERE id = ? AND owner_id = ?",
        )
        .bind(id)
        .bind(identity.user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(not_found)
    }

    pub async fn create(
        &self,
        identity: &Identity,
        payload: &Valid<TodoRequest>,
    ) -> Result<Todo, AppError> {
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title, description, priority, complete, owner_id)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, title, description, priority, complete, owner_id",
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.priority)
        .bind(payload.complete)
        .bind(identity.user_id)
        .fetch_one(self.pool)
        .await?;

        debug!("User {} created todo {}", identity.user_id, todo.id);
        Ok(todo)
    }

    /// Replaces title, description, priority and completion of an owned todo.
    ///
    /// Runs as one conditional statement; zero affected rows means no todo with
    /// `id` belongs to the caller.
    pub async fn update(
        &self,
        identity: &Identity,
        id: i64,
        payload: &Valid<TodoRequest>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?, description = ?, priority = ?, complete = ?
             WHERE id = ? AND owner_id = ?",
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.priority)
        .bind(payload.complete)
        .bind(id)
        .bind(identity.user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!("User {} cannot update todo {}", identity.user_id, id);
            return Err(not_found());
        }
        Ok(())
    }

    pub async fn delete(&self, identity: &Identity, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(identity.user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!("User {} cannot delete todo {}", identity.user_id, id);
            return Err(not_found());
        }
        Ok(())
    }

    /// Deletes a todo regardless of owner.
    pub async fn delete_any(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        info!("Todo {} deleted by an administrator", id);
        Ok(())
    }
}
