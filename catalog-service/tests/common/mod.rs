#![allow(dead_code)]

use std::sync::Arc;

use auth::AccessPolicy;
use auth::TokenIssuer;
use auth::TokenSubject;
use auth::TokenVerifier;
use catalog_service::access::service::AccessService;
use catalog_service::book::service::BookService;
use catalog_service::bootstrap::ensure_admin_identity;
use catalog_service::config::AdminConfig;
use catalog_service::identity::service::IdentityService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::repositories::SqliteBookRepository;
use catalog_service::repositories::SqliteIdentityRepository;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@library.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task with a seeded administrator
    pub async fn spawn() -> Self {
        // A single connection that never expires keeps the in-memory database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let identity_repository = Arc::new(SqliteIdentityRepository::new(pool.clone()));
        let book_repository = Arc::new(SqliteBookRepository::new(pool.clone()));

        let identity_service = Arc::new(IdentityService::new(Arc::clone(&identity_repository)));
        let book_service = Arc::new(BookService::new(book_repository));
        let access_service = Arc::new(AccessService::new(
            identity_repository,
            Arc::new(TokenIssuer::new(JWT_SECRET, Duration::hours(1))),
        ));
        let access_policy = Arc::new(AccessPolicy::new(TokenVerifier::new(JWT_SECRET)));

        ensure_admin_identity(
            &*identity_service,
            &AdminConfig {
                name: "Head Librarian".to_string(),
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            },
        )
        .await
        .expect("Failed to seed administrator");

        let router = create_router(identity_service, book_service, access_service, access_policy);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            pool,
            api_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(JWT_SECRET, Duration::hours(1)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Register a non-admin user on behalf of the seeded admin and return its id
    pub async fn register(&self, name: &str, email: &str, password: &str) -> i64 {
        let admin_token = self.admin_token().await;
        let response = self
            .post("/api/users")
            .bearer_auth(&admin_token)
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing user id")
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Token for `subject` issued at `issued_at`, bypassing the login endpoint
    pub fn token_issued_at(&self, subject: &TokenSubject, issued_at: i64) -> String {
        self.token_issuer
            .issue_at(subject, issued_at)
            .expect("Failed to issue token")
    }
}
