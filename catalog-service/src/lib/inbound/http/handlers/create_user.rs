use auth::Capability;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::identity::errors::DisplayNameError;
use crate::domain::identity::errors::EmailError;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::RegisterIdentityCommand;
use crate::inbound::http::middleware::require;
use crate::inbound::http::middleware::PresentedToken;
use crate::inbound::http::router::AppState;

/// Registering requires a signed-in caller; registering an admin requires an admin.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(token): Extension<PresentedToken>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    require(&state.access_policy, &token, &Capability::AuthenticatedAny)?;

    let Json(body) = body?;
    if body.is_admin {
        require(&state.access_policy, &token, &Capability::Admin)?;
    }

    state
        .identity_service
        .register_identity(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::CREATED, identity.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    name: String,
    email: String,
    password: String,
    #[serde(default)]
    is_admin: bool,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] DisplayNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<RegisterIdentityCommand, ParseCreateUserRequestError> {
        Ok(RegisterIdentityCommand {
            name: DisplayName::new(self.name)?,
            email: EmailAddress::new(self.email)?,
            secret: self.password,
            is_admin: self.is_admin,
        })
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
