use crate::{
    auth::AuthenticatedUser,
    db::DbPool,
    error::AppError,
    models::TodoRequest,
    repository::TodoRepository,
    validation::{ResourceId, ValidatedJson, ValidatedPath},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Lists the todos owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Todo` objects, ordered by id.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("/")]
pub async fn read_all(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todos = TodoRepository::new(pool.get_ref()).list_for_owner(&user).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Retrieves one todo owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: The `Todo` as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no todo with this id belongs to the user.
/// - `422 Unprocessable Entity`: If the id is not a positive integer.
#[get("/{id}")]
pub async fn read_todo(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: ValidatedPath<ResourceId>,
) -> Result<impl Responder, AppError> {
    let todo = TodoRepository::new(pool.get_ref()).get(&user, path.0.id).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Creates a todo owned by the authenticated user.
///
/// ## Request Body:
/// `{title, description, priority, complete}`; see `TodoRequest` for the rules.
///
/// ## Responses:
/// - `201 Created`: The new `Todo`, including its id and `owner_id`.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If the body is malformed or violates a field rule.
#[post("/")]
pub async fn create_todo(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    body: ValidatedJson<TodoRequest>,
) -> Result<impl Responder, AppError> {
    let todo = TodoRepository::new(pool.get_ref()).create(&user, &body.0).await?;
    Ok(HttpResponse::Created().json(todo))
}

/// Replaces title, description, priority and completion of an owned todo.
///
/// ## Responses:
/// - `204 No Content`: On success.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no todo with this id belongs to the user.
/// - `422 Unprocessable Entity`: If the id or body is invalid.
#[put("/{id}")]
pub async fn update_todo(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: ValidatedPath<ResourceId>,
    body: ValidatedJson<TodoRequest>,
) -> Result<impl Responder, AppError> {
    TodoRepository::new(pool.get_ref())
        .update(&user, path.0.id, &body.0)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Deletes an owned todo.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no todo with this id belongs to the user.
/// - `422 Unprocessable Entity`: If the id is not a positive integer.
#[delete("/{id}")]
pub async fn delete_todo(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: ValidatedPath<ResourceId>,
) -> Result<impl Responder, AppError> {
    TodoRepository::new(pool.get_ref())
        .delete(&user, path.0.id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
