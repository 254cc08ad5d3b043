/// Permission level an operation requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// Anyone, with or without a token
    Public,
    /// Any caller holding a valid, unexpired token
    AuthenticatedAny,
    /// Valid token with the admin flag set
    Admin,
    /// Valid token whose subject owns the target resource, or any admin
    SelfOrAdmin { owner: String },
}

impl Capability {
    pub fn self_or_admin(owner: impl ToString) -> Self {
        Self::SelfOrAdmin {
            owner: owner.to_string(),
        }
    }
}
