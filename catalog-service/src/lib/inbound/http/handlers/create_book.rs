use auth::Capability;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::Isbn;
use crate::inbound::http::middleware::require;
use crate::inbound::http::middleware::PresentedToken;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    Extension(token): Extension<PresentedToken>,
    body: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    require(&state.access_policy, &token, &Capability::AuthenticatedAny)?;

    let Json(body) = body?;

    state
        .book_service
        .create_book(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

/// HTTP request body for adding a book (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookRequest {
    title: String,
    author: String,
    #[serde(default)]
    isbn: Option<String>,
    year: i32,
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, BookError> {
        Ok(CreateBookCommand {
            title: self.title,
            author: self.author,
            isbn: self.isbn.map(Isbn::new).transpose()?,
            year: self.year,
        })
    }
}
