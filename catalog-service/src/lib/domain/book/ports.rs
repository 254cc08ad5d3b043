use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookFilter;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::UpdateBookCommand;

/// Port for book domain service operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Add a book to the catalog.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// Retrieve book by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_book(&self, id: BookId) -> Result<Book, BookError>;

    /// Retrieve all books in store order.
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Retrieve books matching every supplied criterion, in store order.
    ///
    /// An empty filter returns the whole catalog.
    async fn search_books(&self, filter: BookFilter) -> Result<Vec<Book>, BookError>;

    /// Replace every field of an existing book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist (nothing is written)
    /// * `DatabaseError` - Database operation failed
    async fn update_book(&self, id: BookId, command: UpdateBookCommand) -> Result<Book, BookError>;

    /// Remove a book from the catalog.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist (nothing is written)
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, id: BookId) -> Result<(), BookError>;
}

/// Persistence operations for the book aggregate.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError>;

    /// Persist a new book and return its store-assigned identifier.
    async fn insert(&self, book: NewBook) -> Result<BookId, BookError>;

    /// Overwrite every field of an existing book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn replace(&self, book: &Book) -> Result<(), BookError>;

    /// Remove a book. Removing an absent book is not an error.
    async fn delete(&self, id: BookId) -> Result<(), BookError>;

    /// Retrieve all books in the store's natural order.
    async fn list_all(&self) -> Result<Vec<Book>, BookError>;
}

#[cfg(test)]
mockall::mock! {
    pub TestBookRepository {}

    #[async_trait]
    impl BookRepository for TestBookRepository {
        async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError>;
        async fn insert(&self, book: NewBook) -> Result<BookId, BookError>;
        async fn replace(&self, book: &Book) -> Result<(), BookError>;
        async fn delete(&self, id: BookId) -> Result<(), BookError>;
        async fn list_all(&self) -> Result<Vec<Book>, BookError>;
    }
}
