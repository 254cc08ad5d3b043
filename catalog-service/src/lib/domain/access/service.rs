use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenIssuer;

use crate::domain::access::credentials::CredentialVerifier;
use crate::domain::access::errors::AccessError;
use crate::domain::access::models::IssuedToken;
use crate::domain::access::ports::AccessServicePort;
use crate::domain::identity::ports::IdentityRepository;

/// Domain service implementation for login.
pub struct AccessService<IR>
where
    IR: IdentityRepository,
{
    verifier: CredentialVerifier<IR>,
    issuer: Arc<TokenIssuer>,
}

impl<IR> AccessService<IR>
where
    IR: IdentityRepository,
{
    pub fn new(repository: Arc<IR>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            verifier: CredentialVerifier::new(repository),
            issuer,
        }
    }
}

#[async_trait]
impl<IR> AccessServicePort for AccessService<IR>
where
    IR: IdentityRepository,
{
    async fn validate_credentials(&self, email: &str, secret: &str) -> Result<bool, AccessError> {
        self.verifier.validate_credentials(email, secret).await
    }

    async fn login(&self, email: &str, secret: &str) -> Result<IssuedToken, AccessError> {
        let identity = self
            .verifier
            .authenticate(email, secret)
            .await?
            .ok_or(AccessError::InvalidCredentials)?;

        let token = self.issuer.issue(&identity.token_subject())?;

        tracing::info!(identity_id = %identity.id, "Access token issued");

        Ok(IssuedToken { identity, token })
    }
}
