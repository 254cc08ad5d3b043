pub mod capability;
pub mod evaluator;

pub use capability::Capability;
pub use evaluator::AccessPolicy;
pub use evaluator::Caller;
pub use evaluator::Decision;
pub use evaluator::DenyReason;
