use crate::{
    auth::{Authenticator, TokenResponse},
    db::DbPool,
    error::AppError,
    models::{CreateUserRequest, LoginForm, NewUser, Role},
    repository::UserRepository,
    validation::ValidatedJson,
};
use actix_web::{post, web, HttpResponse, Responder};
use log::info;

/// Register a new user
///
/// Creates a regular (non-admin) account and returns it without the password hash.
/// Responds `400 Bad Request` when the username or email is already registered.
#[post("/")]
pub async fn create_user(
    pool: web::Data<DbPool>,
    authenticator: web::Data<Authenticator>,
    body: ValidatedJson<CreateUserRequest>,
) -> Result<impl Responder, AppError> {
    let request = body.0.into_inner();
    let users = UserRepository::new(pool.get_ref());

    if users.is_taken(&request.username, &request.email).await? {
        return Err(AppError::BadRequest(
            "Username or email already registered".into(),
        ));
    }

    let user = users
        .create(&NewUser {
            hashed_password: authenticator.hash_password(&request.password)?,
            username: request.username,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            role: Role::User,
        })
        .await?;

    info!("Registered user {} ({})", user.id, user.username);
    Ok(HttpResponse::Created().json(user))
}

/// Login user
///
/// Accepts form-encoded `username` and `password` and returns a bearer token.
#[post("/token")]
pub async fn login(
    pool: web::Data<DbPool>,
    authenticator: web::Data<Authenticator>,
    form: web::Form<LoginForm>,
) -> Result<impl Responder, AppError> {
    let user = authenticator
        .authenticate(&UserRepository::new(pool.get_ref()), &form.username, &form.password)
        .await?;
    let token = authenticator.issue_token(&user)?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}
