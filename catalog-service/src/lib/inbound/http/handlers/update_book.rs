use auth::Capability;
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::domain::book::models::Isbn;
use crate::domain::book::models::UpdateBookCommand;
use crate::inbound::http::middleware::require;
use crate::inbound::http::middleware::PresentedToken;
use crate::inbound::http::router::AppState;

/// HTTP request body for replacing a book (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    pub year: i32,
}

impl UpdateBookRequest {
    fn try_into_command(self) -> Result<UpdateBookCommand, BookError> {
        Ok(UpdateBookCommand {
            title: self.title,
            author: self.author,
            isbn: self.isbn.map(Isbn::new).transpose()?,
            year: self.year,
        })
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Extension(token): Extension<PresentedToken>,
    Path(id): Path<String>,
    req: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    require(&state.access_policy, &token, &Capability::AuthenticatedAny)?;

    let book_id = BookId::from_string(&id).map_err(BookError::from)?;
    let Json(req) = req?;
    let command = req.try_into_command()?;

    state
        .book_service
        .update_book(book_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
