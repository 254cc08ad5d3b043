use thiserror::Error;

/// Error type for secret hashing.
///
/// Verification has no error path: a hash that cannot be parsed simply does not match.
#[derive(Debug, Clone, Error)]
pub enum SecretHashError {
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),
}
