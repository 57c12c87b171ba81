use crate::{
    auth::{AuthenticatedUser, Authenticator},
    db::DbPool,
    error::AppError,
    models::PasswordChange,
    repository::UserRepository,
    validation::ValidatedJson,
};
use actix_web::{get, put, web, HttpResponse, Responder};

/// Returns the caller's own account, without the password hash.
#[get("/")]
pub async fn get_user(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let account = UserRepository::new(pool.get_ref())
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Authentication Failed".into()))?;
    Ok(HttpResponse::Ok().json(account))
}

/// Changes the caller's password.
///
/// ## Request Body:
/// `{password, new_password}` where `password` is the current one.
///
/// ## Responses:
/// - `204 No Content`: On success.
/// - `401 Unauthorized`: Invalid token, or `password` does not match.
/// - `422 Unprocessable Entity`: If `new_password` is shorter than 2 characters.
#[put("/password")]
pub async fn change_password(
    pool: web::Data<DbPool>,
    authenticator: web::Data<Authenticator>,
    user: AuthenticatedUser,
    body: ValidatedJson<PasswordChange>,
) -> Result<impl Responder, AppError> {
    authenticator
        .change_password(&UserRepository::new(pool.get_ref()), &user, &body.0)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
