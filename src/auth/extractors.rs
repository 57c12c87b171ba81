use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::ops::Deref;

use crate::auth::guard::{current_identity, require_admin, Identity};
use crate::auth::Authenticator;
use crate::error::AppError;

/// The verified caller of a protected route.
///
/// Reads the `Identity` stored by `AuthMiddleware`. When a route is mounted
/// outside the middleware, the bearer token is verified here instead, so the
/// extractor alone is enough to protect a handler.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl AuthenticatedUser {
    fn resolve(req: &HttpRequest) -> Result<Identity, AppError> {
        if let Some(identity) = req.extensions().get::<Identity>().cloned() {
            return Ok(identity);
        }

        let authenticator = req.app_data::<web::Data<Authenticator>>().ok_or_else(|| {
            AppError::InternalServerError("Authenticator is not registered as app data".into())
        })?;
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        current_identity(authenticator, authorization)
    }
}

impl Deref for AuthenticatedUser {
    type Target = Identity;

    fn deref(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError will be converted into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            Self::resolve(req)
                .map(AuthenticatedUser)
                .map_err(ActixError::from),
        )
    }
}

/// A verified caller holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

impl Deref for AdminUser {
    type Target = Identity;

    fn deref(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = AuthenticatedUser::resolve(req).and_then(|identity| {
            require_admin(&identity)?;
            Ok(AdminUser(identity))
        });
        ready(result.map_err(ActixError::from))
    }
}
