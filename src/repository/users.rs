use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{NewUser, User};

/// Owns reads and writes of the `users` table.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, first_name, last_name, hashed_password, role, is_active
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, first_name, last_name, hashed_password, role, is_active
             FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// Whether another account already uses `username` or `email`.
    pub async fn is_taken(&self, username: &str, email: &str) -> Result<bool, AppError> {
        let existing = sqlx::query_as::<_, (i64,)>(
            "SELECT id FROM users WHERE username = ? OR email = ? LIMIT 1",
        )
        .bind(username)
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(existing.is_some())
    }

    /// Inserts a new active user.
    ///
    /// A unique-constraint violation surfaces as `AppError::BadRequest`, which
    /// covers registrations racing past `is_taken`.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, first_name, last_name, hashed_password, role, is_active)
             VALUES (?, ?, ?, ?, ?, ?, 1)
             RETURNING id, username, email, first_name, last_name, hashed_password, role, is_active",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.hashed_password)
        .bind(new_user.role)
        .fetch_one(self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::BadRequest("Username or email already registered".into())
            }
            other => other.into(),
        })
    }

    pub async fn update_password(&self, id: i64, hashed_password: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET hashed_password = ? WHERE id = ?")
            .bind(hashed_password)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }
        Ok(())
    }
}
