use std::fmt;

use crate::domain::book::errors::BookIdError;
use crate::domain::book::errors::IsbnError;

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: Option<Isbn>,
    pub year: i32,
}

/// Book identifier, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub i64);

impl BookId {
    /// Parse a book ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a base-10 integer
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        s.parse::<i64>()
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(format!("{}: {}", s, e)))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Standard book number value type
///
/// Exactly 13 characters and not blank. Checked on construction, so an `Isbn`
/// that reaches a repository is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    pub const LENGTH: usize = 13;

    /// Create a new validated ISBN.
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `InvalidLength` - Not exactly 13 characters
    pub fn new(code: String) -> Result<Self, IsbnError> {
        if code.trim().is_empty() {
            return Err(IsbnError::Blank);
        }

        let length = code.chars().count();
        if length != Self::LENGTH {
            return Err(IsbnError::InvalidLength {
                expected: Self::LENGTH,
                actual: length,
            });
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Book ready to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: Option<Isbn>,
    pub year: i32,
}

/// Command to add a book to the catalog
#[derive(Debug)]
pub struct CreateBookCommand {
    pub title: String,
    pub author: String,
    pub isbn: Option<Isbn>,
    pub year: i32,
}

/// Command to replace every field of an existing book
#[derive(Debug)]
pub struct UpdateBookCommand {
    pub title: String,
    pub author: String,
    pub isbn: Option<Isbn>,
    pub year: i32,
}

/// Optional search criteria.
///
/// Text criteria match case-insensitive substrings, `year` matches exactly.
/// Absent or blank criteria do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    author: Option<String>,
    title: Option<String>,
    isbn: Option<String>,
    year: Option<i32>,
}

impl BookFilter {
    pub fn new(
        author: Option<String>,
        title: Option<String>,
        isbn: Option<String>,
        year: Option<i32>,
    ) -> Self {
        Self {
            author: Self::normalize(author),
            title: Self::normalize(title),
            isbn: Self::normalize(isbn),
            year,
        }
    }

    fn normalize(criterion: Option<String>) -> Option<String> {
        criterion
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.to_lowercase())
    }

    fn contains(haystack: &str, needle: &Option<String>) -> bool {
        needle
            .as_deref()
            .map_or(true, |needle| haystack.to_lowercase().contains(needle))
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.title.is_none() && self.isbn.is_none() && self.year.is_none()
    }

    pub fn matches(&self, book: &Book) -> bool {
        let isbn_matches = match (&self.isbn, &book.isbn) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(_), Some(isbn)) => Self::contains(isbn.as_str(), &self.isbn),
        };

        Self::contains(&book.author, &self.author)
            && Self::contains(&book.title, &self.title)
            && isbn_matches
            && self.year.map_or(true, |year| book.year == year)
    }
}
