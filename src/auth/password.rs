//! bcrypt hashing for admin passwords.
//!
//! bcrypt is CPU bound, so both directions run on the blocking pool.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Hash `password` with a fresh random salt at the given work factor
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

/// Compare `password` against a stored hash.
///
/// A stored value that is not a valid bcrypt hash counts as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            Ok(false)
        }
    }
}
