use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::access::errors::AccessError;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;

pub mod authenticate;
pub mod create_book;
pub mod create_user;
pub mod delete_book;
pub mod delete_user;
pub mod get_book;
pub mod get_user;
pub mod list_users;
pub mod search_books;
pub mod update_book;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
            Self::UnprocessableEntity(rejection.body_text())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotFound(_) => ApiError::NotFound(err.to_string()),
            IdentityError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            IdentityError::InvalidIdentityId(_) => ApiError::BadRequest(err.to_string()),
            IdentityError::InvalidName(_) | IdentityError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            IdentityError::SecretHashing(_) | IdentityError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BookError::InvalidBookId(_) => ApiError::BadRequest(err.to_string()),
            BookError::InvalidIsbn(_) => ApiError::UnprocessableEntity(err.to_string()),
            BookError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccessError::Identity(e) => ApiError::from(e),
            AccessError::Verification(_) | AccessError::Token(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of an identity. The secret hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&Identity> for UserData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.0,
            name: identity.name.as_str().to_string(),
            email: identity.email.as_str().to_string(),
            is_admin: identity.is_admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookData {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub year: i32,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.0,
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.as_ref().map(|isbn| isbn.as_str().to_string()),
            year: book.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenError;

    use super::*;
    use crate::domain::book::errors::IsbnError;
    use crate::domain::identity::errors::EmailError;

    #[test]
    fn test_identity_error_mapping() {
        assert!(matches!(
            ApiError::from(IdentityError::NotFound("1".to_string())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(IdentityError::EmailAlreadyExists("a@x.com".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(IdentityError::from(EmailError::InvalidFormat(
                "nope".to_string()
            ))),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(IdentityError::DatabaseError("boom".to_string())),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_book_error_mapping() {
        assert!(matches!(
            ApiError::from(BookError::from(IsbnError::Blank)),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(BookError::NotFound("1".to_string())),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_access_error_mapping() {
        assert_eq!(
            ApiError::from(AccessError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert!(matches!(
            ApiError::from(AccessError::Identity(IdentityError::DatabaseError(
                "boom".to_string()
            ))),
            ApiError::InternalServerError(_)
        ));
        assert!(matches!(
            ApiError::from(AccessError::Token(TokenError::EncodingFailed(
                "boom".to_string()
            ))),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_forbidden_status() {
        let response = ApiError::Forbidden("Insufficient permissions".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
