use crate::domain::identity::models::Identity;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub identity: Identity,
    pub token: String,
}
