use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::Isbn;
use crate::domain::book::models::NewBook;
use crate::domain::book::ports::BookRepository;

pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    isbn: Option<String>,
    year: i32,
}

impl TryFrom<BookRow> for Book {
    type Error = BookError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book {
            id: BookId(row.id),
            title: row.title,
            author: row.author,
            isbn: row.isbn.map(Isbn::new).transpose()?,
            year: row.year,
        })
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, isbn, year
            FROM books
            WHERE id = ?1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from).transpose()
    }

    async fn insert(&self, book: NewBook) -> Result<BookId, BookError> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, isbn, year)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.isbn.as_ref().map(Isbn::as_str))
        .bind(book.year)
        .execute(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(BookId(result.last_insert_rowid()))
    }

    async fn replace(&self, book: &Book) -> Result<(), BookError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?2, author = ?3, isbn = ?4, year = ?5
            WHERE id = ?1
            "#,
        )
        .bind(book.id.0)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.isbn.as_ref().map(Isbn::as_str))
        .bind(book.year)
        .execute(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(book.id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<(), BookError> {
        sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = ?1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, isbn, year
            FROM books
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Book::try_from).collect()
    }
}
