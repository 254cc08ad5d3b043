//! Access control building blocks
//!
//! - Secret hashing (Argon2id)
//! - Access token issuing and verification (HS256 JWT)
//! - Access policy evaluation for bearer tokens
//!
//! The library knows nothing about how identities are stored. Services map
//! their own records into a [`TokenSubject`] and pass the signing secret in
//! explicitly; there is no global state.
//!
//! # Examples
//!
//! ## Secret Hashing
//! ```
//! use auth::SecretHasher;
//!
//! let hasher = SecretHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Issuing and Authorizing
//! ```
//! use auth::{AccessPolicy, Capability, TokenIssuer, TokenSubject, TokenVerifier};
//! use chrono::Duration;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret, Duration::hours(1));
//! let policy = AccessPolicy::new(TokenVerifier::new(secret));
//!
//! let subject = TokenSubject {
//!     id: "1".to_string(),
//!     name: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//!     admin: false,
//! };
//! let token = issuer.issue(&subject).unwrap();
//!
//! assert!(policy.authorize(Some(&token), &Capability::AuthenticatedAny).is_allowed());
//! assert!(!policy.authorize(Some(&token), &Capability::Admin).is_allowed());
//! assert!(!policy.authorize(None, &Capability::self_or_admin(1)).is_allowed());
//! ```

pub mod password;
pub mod policy;
pub mod token;

pub use password::SecretHashError;
pub use password::SecretHasher;
pub use policy::AccessPolicy;
pub use policy::Caller;
pub use policy::Capability;
pub use policy::Decision;
pub use policy::DenyReason;
pub use token::AccessClaims;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenSubject;
pub use token::TokenVerifier;
