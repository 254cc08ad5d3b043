use std::sync::Arc;
use std::time::Duration;

use auth::AccessPolicy;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::create_book::create_book;
use super::handlers::create_user::create_user;
use super::handlers::delete_book::delete_book;
use super::handlers::delete_user::delete_user;
use super::handlers::get_book::get_book;
use super::handlers::get_user::get_user;
use super::handlers::list_users::list_users;
use super::handlers::search_books::search_books;
use super::handlers::update_book::update_book;
use super::handlers::update_user::update_user;
use super::middleware::capture_bearer_token;
use crate::domain::access::ports::AccessServicePort;
use crate::domain::book::ports::BookServicePort;
use crate::domain::identity::ports::IdentityServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub book_service: Arc<dyn BookServicePort>,
    pub access_service: Arc<dyn AccessServicePort>,
    pub access_policy: Arc<AccessPolicy>,
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    book_service: Arc<dyn BookServicePort>,
    access_service: Arc<dyn AccessServicePort>,
    access_policy: Arc<AccessPolicy>,
) -> Router {
    let state = AppState {
        identity_service,
        book_service,
        access_service,
        access_policy,
    };

    let auth_routes = Router::new().route("/api/auth/login", post(authenticate));

    let book_routes = Router::new()
        .route("/api/books", get(search_books).post(create_book))
        .route(
            "/api/books/:book_id",
            get(get_book).put(update_book).delete(delete_book),
        );

    let user_routes = Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .merge(book_routes)
        .merge(user_routes)
        .layer(middleware::from_fn(capture_bearer_token))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
