use chrono::Utc;

use super::capability::Capability;
use crate::token::AccessClaims;
use crate::token::TokenError;
use crate::token::TokenVerifier;

/// Who is calling, as far as the presented token can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated(AccessClaims),
    AuthenticatedAdmin(AccessClaims),
}

impl Caller {
    fn from_claims(claims: AccessClaims) -> Self {
        if claims.admin {
            Self::AuthenticatedAdmin(claims)
        } else {
            Self::Authenticated(claims)
        }
    }

    pub fn claims(&self) -> Option<&AccessClaims> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(claims) | Caller::AuthenticatedAdmin(claims) => Some(claims),
        }
    }

    /// Subject (identity id) of the token, if any.
    pub fn subject(&self) -> Option<&str> {
        self.claims().map(|claims| claims.sub.as_str())
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Caller::AuthenticatedAdmin(_))
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    MissingToken,
    InvalidToken,
    Expired,
    InsufficientCapability,
}

impl DenyReason {
    /// True when the caller could not be identified at all (as opposed to
    /// being identified but lacking the capability).
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, DenyReason::InsufficientCapability)
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(Caller),
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }
}

/// Decides whether a presented bearer token may invoke an operation.
///
/// Evaluation has no side effects and never fails: unparseable, forged and
/// expired tokens all become `Deny` for anything but public operations.
pub struct AccessPolicy {
    verifier: TokenVerifier,
}

impl AccessPolicy {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    /// Evaluate against the current time.
    pub fn authorize(&self, token: Option<&str>, requirement: &Capability) -> Decision {
        self.authorize_at(token, requirement, Utc::now().timestamp())
    }

    /// Evaluate as of `now` (Unix seconds).
    ///
    /// Public operations always allow; the caller is resolved from the token
    /// when it verifies and is `Anonymous` otherwise.
    pub fn authorize_at(&self, token: Option<&str>, requirement: &Capability, now: i64) -> Decision {
        let verified = token.map(|token| self.verifier.verify_at(token, now));

        if let Capability::Public = requirement {
            let caller = match verified {
                Some(Ok(claims)) => Caller::from_claims(claims),
                _ => Caller::Anonymous,
            };
            return Decision::Allow(caller);
        }

        let caller = match verified {
            None => return Decision::Deny(DenyReason::MissingToken),
            Some(Err(TokenError::Expired)) => return Decision::Deny(DenyReason::Expired),
            Some(Err(_)) => return Decision::Deny(DenyReason::InvalidToken),
            Some(Ok(claims)) => Caller::from_claims(claims),
        };

        let permitted = match requirement {
            Capability::Public | Capability::AuthenticatedAny => true,
            Capability::Admin => caller.is_admin(),
            Capability::SelfOrAdmin { owner } => {
                caller.is_admin() || caller.subject() == Some(owner.as_str())
            }
        };

        if permitted {
            Decision::Allow(caller)
        } else {
            Decision::Deny(DenyReason::InsufficientCapability)
        }
    }
}
