use async_trait::async_trait;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::RegisterIdentityCommand;
use crate::domain::identity::models::UpdateIdentityCommand;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `command` - Validated name and email, plain secret and admin flag
    ///
    /// # Returns
    /// Created identity with its store-assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `SecretHashing` - Secret could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register_identity(
        &self,
        command: RegisterIdentityCommand,
    ) -> Result<Identity, IdentityError>;

    /// Retrieve identity by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_identity(&self, id: IdentityId) -> Result<Identity, IdentityError>;

    /// Retrieve all identities in store order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_identities(&self) -> Result<Vec<Identity>, IdentityError>;

    /// Replace an identity's name, email and admin flag.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist (nothing is written)
    /// * `EmailAlreadyExists` - Another identity holds the new email (nothing is written)
    /// * `DatabaseError` - Database operation failed
    async fn update_identity(
        &self,
        id: IdentityId,
        command: UpdateIdentityCommand,
    ) -> Result<Identity, IdentityError>;

    /// Delete an identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist (nothing is written)
    /// * `DatabaseError` - Database operation failed
    async fn delete_identity(&self, id: IdentityId) -> Result<(), IdentityError>;
}

/// Persistence operations for the identity aggregate.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Retrieve identity by exact (case-sensitive) email.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Persist a new identity.
    ///
    /// # Returns
    /// Store-assigned identifier
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Store-level uniqueness constraint rejected the email
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, identity: NewIdentity) -> Result<IdentityId, IdentityError>;

    /// Overwrite name, email and admin flag of an existing identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `EmailAlreadyExists` - Store-level uniqueness constraint rejected the email
    /// * `DatabaseError` - Database operation failed
    async fn replace(&self, identity: &Identity) -> Result<(), IdentityError>;

    /// Remove an identity. Removing an absent identity is not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: IdentityId) -> Result<(), IdentityError>;

    /// Retrieve all identities in the store's natural order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Identity>, IdentityError>;
}

#[cfg(test)]
mockall::mock! {
    pub TestIdentityRepository {}

    #[async_trait]
    impl IdentityRepository for TestIdentityRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;
        async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, IdentityError>;
        async fn insert(&self, identity: NewIdentity) -> Result<IdentityId, IdentityError>;
        async fn replace(&self, identity: &Identity) -> Result<(), IdentityError>;
        async fn delete(&self, id: IdentityId) -> Result<(), IdentityError>;
        async fn list_all(&self) -> Result<Vec<Identity>, IdentityError>;
    }
}
