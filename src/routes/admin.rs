use crate::{
    auth::AdminUser,
    db::DbPool,
    error::AppError,
    repository::TodoRepository,
    validation::{ResourceId, ValidatedPath},
};
use actix_web::{delete, get, web, HttpResponse, Responder};
use log::info;

/// Lists every todo regardless of owner.
///
/// ## Responses:
/// - `200 OK`: JSON array of all `Todo` objects.
/// - `401 Unauthorized`: Missing/invalid token, or the caller is not an admin.
#[get("/todo")]
pub async fn read_all(
    pool: web::Data<DbPool>,
    _admin: AdminUser,
) -> Result<impl Responder, AppError> {
    let todos = TodoRepository::new(pool.get_ref()).list_all().await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Deletes any todo by id.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: Missing/invalid token, or the caller is not an admin.
/// - `404 Not Found`: If no todo has this id.
/// - `422 Unprocessable Entity`: If the id is not a positive integer.
#[delete("/todo/{id}")]
pub async fn delete_todo(
    pool: web::Data<DbPool>,
    admin: AdminUser,
    path: ValidatedPath<ResourceId>,
) -> Result<impl Responder, AppError> {
    let id = path.0.id;
    TodoRepository::new(pool.get_ref()).delete_any(id).await?;
    info!("Admin {} deleted todo {}", admin.user_id, id);
    Ok(HttpResponse::NoContent().finish())
}
