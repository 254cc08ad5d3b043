use std::sync::Arc;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::ports::BookRepository;

/// Existence check run before any book update or delete.
pub struct BookGuard<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookGuard<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }

    /// Load the book or fail with `NotFound`.
    pub async fn existing(&self, id: BookId) -> Result<Book, BookError> {
        match self.repository.find_by_id(id).await? {
            Some(book) => Ok(book),
            None => {
                tracing::debug!(book_id = %id, "Book does not exist");
                Err(BookError::NotFound(id.to_string()))
            }
        }
    }
}
