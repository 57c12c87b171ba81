//! Request-level authorization checks.
//!
//! Every protected route derives an [`Identity`] from the bearer token before it
//! touches data; admin routes additionally pass it through [`require_admin`].

use log::debug;
use serde::Serialize;

use crate::auth::Authenticator;
use crate::error::AppError;
use crate::models::Role;

/// The caller a verified token speaks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Resolves the caller from the raw `Authorization` header.
///
/// Fails closed: a missing header, a non-bearer scheme, and any token
/// verification error all produce `AppError::Unauthorized`.
pub fn current_identity(
    authenticator: &Authenticator,
    authorization: Option<&str>,
) -> Result<Identity, AppError> {
    let header_value =
        authorization.ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;
    let token = bearer_token(header_value)
        .ok_or_else(|| AppError::Unauthorized("Authorization header must use Bearer".into()))?;

    authenticator.verify_token(token).map_err(|err| {
        debug!("Rejected bearer token: {}", err);
        AppError::Unauthorized("Could not validate credentials".into())
    })
}

pub fn require_admin(identity: &Identity) -> Result<(), AppError> {
    if identity.is_admin() {
        Ok(())
    } else {
        debug!("User {} denied admin access", identity.user_id);
        Err(AppError::Forbidden("Authentication Failed".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use chrono::Duration;

    fn authenticator() -> Authenticator {
        Authenticator::new("guard_secret", Duration::minutes(20), 4)
    }

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: 1,
            username: "ab".into(),
            role,
        }
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[test]
    fn test_current_identity_requires_valid_token() {
        let auth = authenticator();
        let user = User {
            id: 7,
            username: "carol".into(),
            email: "carol@example.com".into(),
            first_name: "Carol".into(),
            last_name: "C".into(),
            hashed_password: String::new(),
            role: Role::User,
            is_active: true,
        };
        let token = auth.issue_token(&user).unwrap();
        let header = format!("Bearer {}", token);

        let resolved = current_identity(&auth, Some(&header)).unwrap();
        assert_eq!(resolved.user_id, 7);
        assert_eq!(resolved.username, "carol");

        assert!(matches!(
            current_identity(&auth, None),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            current_identity(&auth, Some("Bearer forged")),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            current_identity(&auth, Some(&token)),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&identity(Role::Admin)).is_ok());
        assert!(matches!(
            require_admin(&identity(Role::User)),
            Err(AppError::Forbidden(_))
        ));
    }
}
