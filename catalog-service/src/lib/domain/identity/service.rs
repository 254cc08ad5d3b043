use std::sync::Arc;

use async_trait::async_trait;
use auth::SecretHasher;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::guard::IdentityGuard;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::RegisterIdentityCommand;
use crate::domain::identity::models::UpdateIdentityCommand;
use crate::domain::identity::ports::IdentityRepository;
use crate::domain::identity::ports::IdentityServicePort;

/// Domain service implementation for identity operations.
///
/// Every write is preceded by the matching `IdentityGuard` check.
pub struct IdentityService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    guard: IdentityGuard<IR>,
    secret_hasher: SecretHasher,
}

impl<IR> IdentityService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new identity service over a repository.
    pub fn new(repository: Arc<IR>) -> Self {
        Self {
            guard: IdentityGuard::new(Arc::clone(&repository)),
            repository,
            secret_hasher: SecretHasher::new(),
        }
    }

    /// Hash on the blocking pool so request tasks keep making progress.
    async fn hash_secret(&self, secret: String) -> Result<String, IdentityError> {
        let hasher = self.secret_hasher;

        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| IdentityError::SecretHashing(format!("Hashing task failed: {}", e)))?
            .map_err(|e| IdentityError::SecretHashing(e.to_string()))
    }
}

#[async_trait]
impl<IR> IdentityServicePort for IdentityService<IR>
where
    IR: IdentityRepository,
{
    async fn register_identity(
        &self,
        command: RegisterIdentityCommand,
    ) -> Result<Identity, IdentityError> {
        let secret_hash = self.hash_secret(command.secret).await?;

        // Checked after hashing so the guard read sits right before the insert.
        self.guard.ensure_email_available(&command.email).await?;

        let new_identity = NewIdentity {
            name: command.name,
            email: command.email,
            secret_hash,
            is_admin: command.is_admin,
        };
        let id = self.repository.insert(new_identity.clone()).await?;

        tracing::info!(identity_id = %id, is_admin = new_identity.is_admin, "Identity registered");

        Ok(Identity {
            id,
            name: new_identity.name,
            email: new_identity.email,
            secret_hash: new_identity.secret_hash,
            is_admin: new_identity.is_admin,
        })
    }

    async fn get_identity(&self, id: IdentityId) -> Result<Identity, IdentityError> {
        self.guard.existing(id).await
    }

    async fn list_identities(&self) -> Result<Vec<Identity>, IdentityError> {
        self.repository.list_all().await
    }

    async fn update_identity(
        &self,
        id: IdentityId,
        command: UpdateIdentityCommand,
    ) -> Result<Identity, IdentityError> {
        let mut identity = self.guard.existing(id).await?;
        self.guard
            .ensure_email_transferable(&identity, &command.email)
            .await?;

        identity.name = command.name;
        identity.email = command.email;
        identity.is_admin = command.is_admin;

        self.repository.replace(&identity).await?;

        tracing::info!(identity_id = %id, "Identity updated");

        Ok(identity)
    }

    async fn delete_identity(&self, id: IdentityId) -> Result<(), IdentityError> {
        self.guard.existing(id).await?;
        self.repository.delete(id).await?;

        tracing::info!(identity_id = %id, "Identity deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::models::DisplayName;
    use crate::domain::identity::models::EmailAddress;
    use crate::domain::identity::ports::MockTestIdentityRepository;

    fn stored_identity(id: i64, email: &str, is_admin: bool) -> Identity {
        Identity {
            id: IdentityId(id),
            name: DisplayName::new("Stored".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            secret_hash: "$argon2id$stored_hash".to_string(),
            is_admin,
        }
    }

    fn register_command(email: &str) -> RegisterIdentityCommand {
        RegisterIdentityCommand {
            name: DisplayName::new("Ada".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            secret: "password123".to_string(),
            is_admin: false,
        }
    }

    fn update_command(email: &str, is_admin: bool) -> UpdateIdentityCommand {
        UpdateIdentityCommand {
            name: DisplayName::new("Renamed".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            is_admin,
        }
    }

    #[tokio::test]
    async fn test_register_identity_success() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(|identity| {
                identity.email.as_str() == "a@x.com"
                    && identity.secret_hash.starts_with("$argon2")
                    && identity.secret_hash != "password123"
                    && !identity.is_admin
            })
            .times(1)
            .returning(|_| Ok(IdentityId(1)));

        let service = IdentityService::new(Arc::new(repository));

        let identity = service
            .register_identity(register_command("a@x.com"))
            .await
            .unwrap();

        assert_eq!(identity.id, IdentityId(1));
        assert_eq!(identity.name.as_str(), "Ada");
        assert!(SecretHasher::new().verify("password123", &identity.secret_hash));
    }

    #[tokio::test]
    async fn test_register_identity_guard_runs_right_before_insert() {
        let mut repository = MockTestIdentityRepository::new();
        let mut sequence = mockall::Sequence::new();

        repository
            .expect_find_by_email()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(|identity| identity.secret_hash.starts_with("$argon2"))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(IdentityId(5)));

        let service = IdentityService::new(Arc::new(repository));

        let identity = service
            .register_identity(register_command("a@x.com"))
            .await
            .unwrap();
        assert_eq!(identity.id, IdentityId(5));
    }

    #[tokio::test]
    async fn test_register_identity_duplicate_email_never_inserts() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_identity(1, "a@x.com", false))));
        repository.expect_insert().times(0);

        let service = IdentityService::new(Arc::new(repository));

        let result = service.register_identity(register_command("a@x.com")).await;
        assert!(matches!(result, Err(IdentityError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_identity_store_constraint_backstop() {
        let mut repository = MockTestIdentityRepository::new();

        // Lost the race: the guard saw nothing, the store's unique constraint fires.
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_insert()
            .times(1)
            .returning(|identity| Err(IdentityError::EmailAlreadyExists(identity.email.to_string())));

        let service = IdentityService::new(Arc::new(repository));

        let result = service.register_identity(register_command("a@x.com")).await;
        assert!(matches!(result, Err(IdentityError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_identity_not_found() {
        let mut repository = MockTestIdentityRepository::new();
        repository.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = IdentityService::new(Arc::new(repository));

        let result = service.get_identity(IdentityId(404)).await;
        assert!(matches!(result, Err(IdentityError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_identities() {
        let mut repository = MockTestIdentityRepository::new();
        repository.expect_list_all().times(1).returning(|| {
            Ok(vec![
                stored_identity(1, "a@x.com", true),
                stored_identity(2, "b@x.com", false),
            ])
        });

        let service = IdentityService::new(Arc::new(repository));

        let identities = service.list_identities().await.unwrap();
        assert_eq!(identities.len(), 2);
        assert_eq!(identities[0].id, IdentityId(1));
        assert_eq!(identities[1].id, IdentityId(2));
    }

    #[tokio::test]
    async fn test_update_identity_success_keeps_secret_hash() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(stored_identity(1, "a@x.com", false))));
        repository
            .expect_find_by_email()
            .withf(|email| email == "new@x.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_replace()
            .withf(|identity| {
                identity.id == IdentityId(1)
                    && identity.name.as_str() == "Renamed"
                    && identity.email.as_str() == "new@x.com"
                    && identity.is_admin
                    && identity.secret_hash == "$argon2id$stored_hash"
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = IdentityService::new(Arc::new(repository));

        let updated = service
            .update_identity(IdentityId(1), update_command("new@x.com", true))
            .await
            .unwrap();
        assert_eq!(updated.email.as_str(), "new@x.com");
        assert!(updated.is_admin);
    }

    #[tokio::test]
    async fn test_update_identity_not_found_never_writes() {
        let mut repository = MockTestIdentityRepository::new();

        repository.expect_find_by_id().times(1).returning(|_| Ok(None));
        repository.expect_find_by_email().times(0);
        repository.expect_replace().times(0);

        let service = IdentityService::new(Arc::new(repository));

        let result = service
            .update_identity(IdentityId(99), update_command("a@x.com", false))
            .await;
        assert!(matches!(result, Err(IdentityError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_identity_email_conflict_never_writes() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(stored_identity(1, "a@x.com", false))));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_identity(2, "b@x.com", false))));
        repository.expect_replace().times(0);

        let service = IdentityService::new(Arc::new(repository));

        let result = service
            .update_identity(IdentityId(1), update_command("b@x.com", false))
            .await;
        assert!(matches!(result, Err(IdentityError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_delete_identity_success() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(stored_identity(3, "c@x.com", false))));
        repository
            .expect_delete()
            .withf(|id| *id == IdentityId(3))
            .times(1)
            .returning(|_| Ok(()));

        let service = IdentityService::new(Arc::new(repository));

        assert!(service.delete_identity(IdentityId(3)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_identity_not_found_never_writes() {
        let mut repository = MockTestIdentityRepository::new();

        repository.expect_find_by_id().times(1).returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = IdentityService::new(Arc::new(repository));

        let result = service.delete_identity(IdentityId(3)).await;
        assert!(matches!(result, Err(IdentityError::NotFound(_))));
    }
}
