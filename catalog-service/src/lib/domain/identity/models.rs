use std::fmt;
use std::str::FromStr;

use auth::TokenSubject;

use crate::domain::identity::errors::DisplayNameError;
use crate::domain::identity::errors::EmailError;
use crate::domain::identity::errors::IdentityIdError;

/// Registered user.
///
/// Only the hash of the secret is ever held; the raw secret lives in
/// `RegisterIdentityCommand` until it is hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub name: DisplayName,
    pub email: EmailAddress,
    pub secret_hash: String,
    pub is_admin: bool,
}

impl Identity {
    /// Snapshot of the claims a token for this identity carries.
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.id.to_string(),
            name: self.name.as_str().to_string(),
            email: self.email.as_str().to_string(),
            admin: self.is_admin,
        }
    }
}

/// Identity identifier, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub i64);

impl IdentityId {
    /// Parse an identity ID from a path segment or token subject.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a base-10 integer
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        s.parse::<i64>()
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(format!("{}: {}", s, e)))
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type. Must contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        if name.trim().is_empty() {
            return Err(DisplayNameError::Blank);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Comparison is exact
/// and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity ready to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub secret_hash: String,
    pub is_admin: bool,
}

/// Command to register a new identity with domain types
#[derive(Debug)]
pub struct RegisterIdentityCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    /// Plain text secret, hashed by the service and then dropped
    pub secret: String,
    pub is_admin: bool,
}

/// Command to update an identity's profile.
///
/// Replaces name, email and admin flag. The secret hash cannot be changed here.
#[derive(Debug)]
pub struct UpdateIdentityCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub is_admin: bool,
}
