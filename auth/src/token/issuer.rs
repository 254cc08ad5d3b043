use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::AccessClaims;
use super::claims::TokenSubject;
use super::errors::TokenError;

/// Mints signed, time-bounded access tokens (HS256).
///
/// The signing secret is fixed for the lifetime of the issuer. Replacing it
/// invalidates every token issued before.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret (at least 32 bytes recommended)
    /// * `ttl` - How long each token stays valid after issue
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issue a token for `subject`, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issue a token whose `iat` is `issued_at` (Unix seconds).
    pub fn issue_at(&self, subject: &TokenSubject, issued_at: i64) -> Result<String, TokenError> {
        let claims = AccessClaims::for_subject(subject, issued_at, self.ttl);

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenVerifier;

    const SECRET: &[u8] = b"issuer_test_secret_at_least_32_bytes!";

    fn subject() -> TokenSubject {
        TokenSubject {
            id: "7".to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            admin: false,
        }
    }

    #[test]
    fn test_issue_embeds_identity() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1));
        let verifier = TokenVerifier::new(SECRET);

        let token = issuer.issue_at(&subject(), 1_700_000_000).expect("Failed to issue token");
        let claims = verifier
            .verify_at(&token, 1_700_000_010)
            .expect("Failed to verify token");

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.name, "Grace");
        assert_eq!(claims.email, "grace@example.com");
        assert!(!claims.admin);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[test]
    fn test_tokens_at_different_instants_differ() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1));

        let first = issuer.issue_at(&subject(), 1_000).expect("Failed to issue token");
        let second = issuer.issue_at(&subject(), 2_000).expect("Failed to issue token");

        assert_ne!(first, second);
        assert_eq!(first.split('.').count(), 3);
    }

    #[test]
    fn test_issue_uses_wall_clock() {
        let issuer = TokenIssuer::new(SECRET, Duration::minutes(5));
        let verifier = TokenVerifier::new(SECRET);

        let before = Utc::now().timestamp();
        let token = issuer.issue(&subject()).expect("Failed to issue token");
        let claims = verifier.verify(&token).expect("Failed to verify token");

        assert!(claims.iat >= before);
        assert_eq!(claims.exp - claims.iat, 300);
    }
}
