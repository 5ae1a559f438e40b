//! bcrypt hashing on the blocking pool.

use tokio::task;

/// Work factor used for every stored password.
pub const BCRYPT_COST: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Task(#[from] task::JoinError),
}

/// Hash `plaintext` with a fresh salt.
///
/// # Errors
/// Returns an error if bcrypt rejects the input or the blocking task fails.
pub async fn hash(plaintext: String, cost: u32) -> Result<String, HashError> {
    Ok(task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??)
}

/// Compare `plaintext` with a stored bcrypt hash.
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed or the blocking task fails.
pub async fn verify(plaintext: String, stored_hash: String) -> Result<bool, HashError> {
    Ok(task::spawn_blocking(move || bcrypt::verify(plaintext, &stored_hash)).await??)
}
