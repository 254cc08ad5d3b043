use std::sync::Arc;

use auth::SecretHasher;

use crate::domain::access::errors::AccessError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::ports::IdentityRepository;

/// Checks presented email/secret pairs against stored hashes.
///
/// Emails are matched exactly and are not syntax-checked here: a blank or
/// malformed email still costs one lookup and simply fails to match.
pub struct CredentialVerifier<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    secret_hasher: SecretHasher,
}

impl<IR> CredentialVerifier<IR>
where
    IR: IdentityRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self {
            repository,
            secret_hasher: SecretHasher::new(),
        }
    }

    /// Returns the matching identity, or `None` for an unknown email or a
    /// wrong secret.
    pub async fn authenticate(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<Option<Identity>, AccessError> {
        let Some(identity) = self.repository.find_by_email(email).await? else {
            tracing::debug!("No identity for presented email");
            return Ok(None);
        };

        let hasher = self.secret_hasher;
        let secret = secret.to_string();
        let secret_hash = identity.secret_hash.clone();

        let matches = tokio::task::spawn_blocking(move || hasher.verify(&secret, &secret_hash))
            .await
            .map_err(|e| AccessError::Verification(e.to_string()))?;

        Ok(matches.then_some(identity))
    }

    pub async fn validate_credentials(&self, email: &str, secret: &str) -> Result<bool, AccessError> {
        Ok(self.authenticate(email, secret).await?.is_some())
    }
}
