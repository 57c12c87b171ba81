//! Adaptive password hashing with bcrypt.

use crate::error::AppError;

/// Hashes `password` with a fresh salt at work factor `cost`.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Checks `password` against a stored bcrypt hash.
///
/// A malformed stored hash is an internal error, not a mismatch.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(password, hashed_password)?)
}
