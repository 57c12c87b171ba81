use crate::auth::guard::Identity;
use crate::error::AppError;
use crate::models::{Role, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the username.
    pub sub: String,
    /// The user's database id.
    pub id: i64,
    pub role: Role,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            user_id: claims.id,
            username: claims.sub,
            role: claims.role,
        }
    }
}

/// Signs and verifies HS256 access tokens with a process-wide secret.
///
/// Verification needs nothing but the key, so a `TokenManager` can be shared
/// freely between workers.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenManager {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.set_required_spec_claims(&["exp", "sub"]);
        // A token is dead the moment `exp` passes.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Generates a signed token for `user` that expires after the configured TTL.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalServerError("Token expiry overflow".into()))?;

        let claims = Claims {
            sub: user.username.clone(),
            id: user.id,
            role: user.role,
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry, returning the identity the token vouches for.
    ///
    /// Any decoding failure yields `AppError::Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: 42,
            username: "ab".into(),
            email: "ab@example.com".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            hashed_password: String::new(),
            role,
            is_active: true,
        }
    }

    fn manager(secret: &str) -> TokenManager {
        TokenManager::new(secret, Duration::minutes(20))
    }

    #[test]
    fn test_token_generation_and_verification() {
        let tokens = manager("test_secret_for_gen_verify");
        let token = tokens.issue(&user(Role::Admin)).unwrap();
        let identity = tokens.verify(&token).unwrap();

        assert_eq!(identity.user_id, 42);
        assert_eq!(identity.username, "ab");
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_token_expiration() {
        let secret = "test_secret_for_expiration";
        let expired_at = Utc::now()
            .checked_sub_signed(Duration::hours(2))
            .expect("valid timestamp");

        let claims_expired = Claims {
            sub: "ab".into(),
            id: 2,
            role: Role::User,
            iat: (expired_at - Duration::minutes(20)).timestamp() as usize,
            exp: expired_at.timestamp() as usize,
        };
        let expired_token = encode(
            &Header::new(Algorithm::HS256),
            &claims_expired,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        match manager(secret).verify(&expired_token) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.contains("ExpiredSignature"), "unexpected message: {}", msg)
            }
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_token_expired_seconds_ago_is_rejected() {
        let secret = "test_secret_for_recent_expiry";
        let now = Utc::now();
        let claims = Claims {
            sub: "ab".into(),
            id: 2,
            role: Role::User,
            iat: (now - Duration::minutes(20)).timestamp() as usize,
            exp: (now - Duration::seconds(5)).timestamp() as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            manager(secret).verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_invalid_token_signature() {
        let token = manager("one_secret").issue(&user(Role::User)).unwrap();

        match manager("a_completely_different_secret").verify(&token) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("InvalidSignature")),
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let tokens = manager("tamper_secret");
        let token = tokens.issue(&user(Role::User)).unwrap();

        // Swap in a payload claiming the admin role, keeping the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_claims = Claims {
            sub: "ab".into(),
            id: 42,
            role: Role::Admin,
            iat: 0,
            exp: (Utc::now() + Duration::minutes(5)).timestamp() as usize,
        };
        let forged_token = encode(
            &Header::new(Algorithm::HS256),
            &forged_claims,
            &EncodingKey::from_secret(b"attacker"),
        )
        .unwrap();
        let forged_payload = forged_token.split('.').nth(1).unwrap();
        let tampered = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(
            tokens.verify(&tampered),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(
            manager("s").verify("not-a-jwt"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
