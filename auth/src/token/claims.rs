use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Identity snapshot a token is minted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    /// Stable identifier of the identity, rendered as a string
    pub id: String,
    pub name: String,
    pub email: String,
    pub admin: bool,
}

/// Claims carried by an access token.
///
/// Standard `sub`, `iat` and `exp` (Unix seconds) plus the identity's display
/// name, email and admin flag. The claims are a snapshot taken at issue time:
/// later changes to the identity are not reflected until a new token is issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims for a subject, valid from `issued_at` for `ttl`.
    pub fn for_subject(subject: &TokenSubject, issued_at: i64, ttl: Duration) -> Self {
        Self {
            sub: subject.id.clone(),
            name: subject.name.clone(),
            email: subject.email.clone(),
            admin: subject.admin,
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        }
    }

    /// A token stops being accepted at the instant its expiry is reached.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
