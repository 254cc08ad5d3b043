use crate::config::AdminConfig;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::RegisterIdentityCommand;
use crate::domain::identity::ports::IdentityServicePort;

/// Register the configured administrator unless its email is already taken.
///
/// An existing identity with that email is left untouched, whatever its
/// admin flag.
pub async fn ensure_admin_identity(
    identity_service: &dyn IdentityServicePort,
    admin: &AdminConfig,
) -> Result<(), IdentityError> {
    let command = RegisterIdentityCommand {
        name: DisplayName::new(admin.name.clone())?,
        email: EmailAddress::new(admin.email.clone())?,
        secret: admin.password.clone(),
        is_admin: true,
    };

    match identity_service.register_identity(command).await {
        Ok(identity) => {
            tracing::info!(identity_id = %identity.id, email = %identity.email, "Administrator created");
            Ok(())
        }
        Err(IdentityError::EmailAlreadyExists(email)) => {
            tracing::info!(email = %email, "Administrator already present, skipping");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
