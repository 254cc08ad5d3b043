use async_trait::async_trait;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::IssuedToken;

/// Port for credential checks and token issuing.
#[async_trait]
pub trait AccessServicePort: Send + Sync + 'static {
    /// Check an email/secret pair against the stored hash.
    ///
    /// # Returns
    /// `true` iff an identity holds `email` and `secret` matches its hash.
    /// Unknown emails yield `false`, not an error.
    ///
    /// # Errors
    /// * `Identity` - Identity store lookup failed
    /// * `Verification` - Blocking verification task failed
    async fn validate_credentials(&self, email: &str, secret: &str) -> Result<bool, AccessError>;

    /// Verify credentials and issue an access token for the matching identity.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong secret
    /// * `Identity` - Identity store lookup failed
    /// * `Token` - Token could not be signed
    async fn login(&self, email: &str, secret: &str) -> Result<IssuedToken, AccessError>;
}
