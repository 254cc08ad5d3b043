use auth::AccessPolicy;
use auth::Caller;
use auth::Capability;
use auth::Decision;
use auth::DenyReason;
use axum::extract::Request;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;

/// Bearer token presented with the request, if any.
///
/// A header that is present but not of the form `Bearer <token>` is kept
/// verbatim, so the policy rejects it as an invalid token rather than
/// treating the caller as having sent nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentedToken(pub Option<String>);

impl PresentedToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Middleware that records the presented bearer token in request extensions.
///
/// It never rejects a request; each handler evaluates the capability its
/// operation requires.
pub async fn capture_bearer_token(mut req: Request, next: Next) -> Response {
    let token = extract_token_from_header(&req);
    req.extensions_mut().insert(PresentedToken(token));

    next.run(req).await
}

fn extract_token_from_header(req: &Request) -> Option<String> {
    let auth_header = req.headers().get(http::header::AUTHORIZATION)?;

    let Ok(auth_str) = auth_header.to_str() else {
        tracing::debug!("Authorization header is not valid ASCII");
        return Some(String::new());
    };

    match auth_str.strip_prefix("Bearer ") {
        Some(token) => Some(token.trim().to_string()),
        None => {
            tracing::debug!("Authorization header is not a bearer token");
            Some(auth_str.to_string())
        }
    }
}

/// Evaluate `capability` for the presented token and map a denial to the
/// matching HTTP error (401 for authentication, 403 for authorization).
pub fn require(
    policy: &AccessPolicy,
    token: &PresentedToken,
    capability: &Capability,
) -> Result<Caller, ApiError> {
    match policy.authorize(token.as_deref(), capability) {
        Decision::Allow(caller) => Ok(caller),
        Decision::Deny(reason) => {
            tracing::warn!(
                reason = ?reason,
                capability = ?capability,
                authentication_failure = reason.is_authentication_failure(),
                "Access denied"
            );
            Err(deny_to_api_error(reason))
        }
    }
}

fn deny_to_api_error(reason: DenyReason) -> ApiError {
    match reason {
        DenyReason::MissingToken => ApiError::Unauthorized("Missing bearer token".to_string()),
        DenyReason::InvalidToken => ApiError::Unauthorized("Invalid token".to_string()),
        DenyReason::Expired => ApiError::Unauthorized("Token expired".to_string()),
        DenyReason::InsufficientCapability => {
            ApiError::Forbidden("Insufficient permissions".to_string())
        }
    }
}
