use thiserror::Error;

/// Error for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid book id: {0}")]
    InvalidFormat(String),
}

/// Error for Isbn validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IsbnError {
    #[error("ISBN must not be blank")]
    Blank,

    #[error("ISBN must be exactly {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Top-level error for all book operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book id: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid ISBN: {0}")]
    InvalidIsbn(#[from] IsbnError),

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
