use std::sync::Arc;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::IdentityRepository;

/// Uniqueness and existence checks run before any identity write.
///
/// Only reads through the repository. The checks are not transactional: two
/// concurrent registrations with the same email can both pass, in which case
/// the store's unique constraint rejects the second insert.
pub struct IdentityGuard<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
}

impl<IR> IdentityGuard<IR>
where
    IR: IdentityRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }

    /// Fails with `EmailAlreadyExists` if any identity holds `email`.
    pub async fn ensure_email_available(&self, email: &EmailAddress) -> Result<(), IdentityError> {
        match self.repository.find_by_email(email.as_str()).await? {
            Some(existing) => {
                tracing::debug!(identity_id = %existing.id, "Email already registered");
                Err(IdentityError::EmailAlreadyExists(email.to_string()))
            }
            None => Ok(()),
        }
    }

    /// Fails with `EmailAlreadyExists` if `new_email` differs from the
    /// identity's current email and another identity already holds it.
    pub async fn ensure_email_transferable(
        &self,
        current: &Identity,
        new_email: &EmailAddress,
    ) -> Result<(), IdentityError> {
        if current.email == *new_email {
            return Ok(());
        }

        match self.repository.find_by_email(new_email.as_str()).await? {
            Some(holder) if holder.id != current.id => {
                tracing::debug!(
                    identity_id = %current.id,
                    holder_id = %holder.id,
                    "Email held by another identity"
                );
                Err(IdentityError::EmailAlreadyExists(new_email.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Load the identity or fail with `NotFound`.
    pub async fn existing(&self, id: IdentityId) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))
    }
}
