use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::TokenError;

/// Checks signature and expiry of access tokens.
///
/// Expiry is evaluated against a caller-supplied clock so that decisions can be
/// reproduced; `verify` is the wall-clock shorthand.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at`, not by jsonwebtoken against the system clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as of `now` (Unix seconds).
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token, wrong algorithm, bad signature or missing claims
    /// * `Expired` - Signature is valid but `now` is at or past `exp`
    pub fn verify_at(&self, token: &str, now: i64) -> Result<AccessClaims, TokenError> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?;

        if token_data.claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::token::TokenIssuer;
    use crate::token::TokenSubject;

    const SECRET: &[u8] = b"verifier_test_secret_at_least_32_bytes";

    fn token_at(secret: &[u8], issued_at: i64) -> String {
        let subject = TokenSubject {
            id: "1".to_string(),
            name: "Linus".to_string(),
            email: "linus@example.com".to_string(),
            admin: true,
        };
        TokenIssuer::new(secret, Duration::hours(1))
            .issue_at(&subject, issued_at)
            .expect("Failed to issue token")
    }

    #[test]
    fn test_verify_garbage() {
        let verifier = TokenVerifier::new(SECRET);

        assert!(matches!(
            verifier.verify_at("invalid.token.here", 0),
            Err(TokenError::InvalidToken(_))
        ));
        assert!(matches!(
            verifier.verify_at("", 0),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = token_at(b"another_secret_that_is_32_bytes_long!", 1_000);
        let verifier = TokenVerifier::new(SECRET);

        assert!(matches!(
            verifier.verify_at(&token, 1_001),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_expired() {
        let token = token_at(SECRET, 1_000);
        let verifier = TokenVerifier::new(SECRET);

        assert!(verifier.verify_at(&token, 1_000 + 3_599).is_ok());
        assert_eq!(verifier.verify_at(&token, 1_000 + 3_600), Err(TokenError::Expired));
        assert_eq!(verifier.verify_at(&token, 1_000 + 86_400), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_tampered_signature() {
        let token = token_at(SECRET, 1_000);
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[2] = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        let tampered = parts.join(".");

        let verifier = TokenVerifier::new(SECRET);
        assert!(matches!(
            verifier.verify_at(&tampered, 1_001),
            Err(TokenError::InvalidToken(_))
        ));
    }
}
