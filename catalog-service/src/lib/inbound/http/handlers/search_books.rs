use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::book::models::BookFilter;
use crate::inbound::http::router::AppState;

/// Optional query parameters; any subset may be given.
#[derive(Debug, Default, Deserialize)]
pub struct SearchBooksQuery {
    pub author: Option<String>,
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub year: Option<i32>,
}

impl From<SearchBooksQuery> for BookFilter {
    fn from(query: SearchBooksQuery) -> Self {
        BookFilter::new(query.author, query.title, query.isbn, query.year)
    }
}

pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchBooksQuery>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    let filter = BookFilter::from(query);

    let books = if filter.is_empty() {
        state.book_service.list_books().await?
    } else {
        state.book_service.search_books(filter).await?
    };

    Ok(ApiSuccess::new(
        StatusCode::OK,
        books.iter().map(BookData::from).collect(),
    ))
}
