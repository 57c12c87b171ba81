//! Validation layer.
//!
//! Request payloads are checked against their `validator` rules before any
//! handler logic runs. A [`Valid<T>`] can only be obtained by passing those
//! checks, and repository writes accept nothing else.

use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

/// A value that has passed its validation rules.
#[derive(Debug, Clone)]
pub struct Valid<T>(T);

impl<T: Validate> Valid<T> {
    pub fn new(value: T) -> Result<Self, AppError> {
        value.validate()?;
        Ok(Valid(value))
    }
}

impl<T> Valid<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Valid<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Numeric id taken from a `{id}` path segment; must be positive.
#[derive(Debug, Deserialize, Validate)]
pub struct ResourceId {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub id: i64,
}

/// JSON body extractor that validates after deserializing.
pub struct ValidatedJson<T>(pub Valid<T>);

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<T>::from_request(req, payload);
        Box::pin(async move {
            let body = body.await?;
            Ok(ValidatedJson(Valid::new(body.into_inner())?))
        })
    }
}

/// Path extractor that validates after deserializing.
pub struct ValidatedPath<T>(pub Valid<T>);

impl<T> FromRequest for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let path = web::Path::<T>::from_request(req, payload);
        Box::pin(async move {
            let path = path.await?;
            Ok(ValidatedPath(Valid::new(path.into_inner())?))
        })
    }
}

/// Query-string extractor that validates after deserializing.
pub struct ValidatedQuery<T>(pub Valid<T>);

impl<T> FromRequest for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let query = web::Query::<T>::from_request(req, payload);
        Box::pin(async move {
            let query = query.await?;
            Ok(ValidatedQuery(Valid::new(query.into_inner())?))
        })
    }
}

/// Malformed or incomplete JSON bodies are reported as 422.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| AppError::from(err).into())
}

/// Path segments that fail to parse (e.g. a non-integer id) are reported as 422.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| AppError::from(err).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| AppError::from(err).into())
}

/// Form bodies with missing or ill-typed fields are reported as 422.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| AppError::from(err).into())
}
