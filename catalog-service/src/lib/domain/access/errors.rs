use auth::TokenError;
use thiserror::Error;

use crate::domain::identity::errors::IdentityError;

/// Errors raised while checking credentials or issuing access tokens
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// Unknown email and wrong secret are deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Secret verification failed: {0}")]
    Verification(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Token(#[from] TokenError),
}
