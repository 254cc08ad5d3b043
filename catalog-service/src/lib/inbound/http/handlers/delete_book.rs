use auth::Capability;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::require;
use crate::inbound::http::middleware::PresentedToken;
use crate::inbound::http::router::AppState;

pub async fn delete_book(
    State(state): State<AppState>,
    Extension(token): Extension<PresentedToken>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let book_id = BookId::from_string(&id).map_err(BookError::from)?;

    require(&state.access_policy, &token, &Capability::AuthenticatedAny)?;

    state
        .book_service
        .delete_book(book_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
