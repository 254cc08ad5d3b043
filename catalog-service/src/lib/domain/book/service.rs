use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::guard::BookGuard;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookFilter;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

/// Domain service implementation for catalog operations.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
    guard: BookGuard<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self {
            guard: BookGuard::new(Arc::clone(&repository)),
            repository,
        }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        let new_book = NewBook {
            title: command.title,
            author: command.author,
            isbn: command.isbn,
            year: command.year,
        };
        let id = self.repository.insert(new_book.clone()).await?;

        tracing::info!(book_id = %id, "Book created");

        Ok(Book {
            id,
            title: new_book.title,
            author: new_book.author,
            isbn: new_book.isbn,
            year: new_book.year,
        })
    }

    async fn get_book(&self, id: BookId) -> Result<Book, BookError> {
        self.guard.existing(id).await
    }

    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.list_all().await
    }

    async fn search_books(&self, filter: BookFilter) -> Result<Vec<Book>, BookError> {
        let books = self.repository.list_all().await?;

        if filter.is_empty() {
            return Ok(books);
        }

        Ok(books
            .into_iter()
            .filter(|book| filter.matches(book))
            .collect())
    }

    async fn update_book(&self, id: BookId, command: UpdateBookCommand) -> Result<Book, BookError> {
        let mut book = self.guard.existing(id).await?;

        book.title = command.title;
        book.author = command.author;
        book.isbn = command.isbn;
        book.year = command.year;

        self.repository.replace(&book).await?;

        tracing::info!(book_id = %id, "Book updated");

        Ok(book)
    }

    async fn delete_book(&self, id: BookId) -> Result<(), BookError> {
        self.guard.existing(id).await?;
        self.repository.delete(id).await?;

        tracing::info!(book_id = %id, "Book deleted");

        Ok(())
    }
}
