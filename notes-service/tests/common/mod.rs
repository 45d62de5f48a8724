use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use notes_service::domain::note::service::NoteService;
use notes_service::domain::user::errors::IdentityError;
use notes_service::domain::user::models::VerifiedIdentity;
use notes_service::domain::user::ports::IdentityVerifier;
use notes_service::domain::user::service::AuthService;
use notes_service::inbound::http::router::create_router;
use notes_service::inbound::http::router::AppState;
use notes_service::inbound::http::router::StorageMode;
use notes_service::outbound::repositories::InMemoryNoteRepository;
use notes_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Identity verifier that accepts tokens of the form `google:<subject>:<email>`.
pub struct StubIdentityVerifier;

#[async_trait]
impl IdentityVerifier for StubIdentityVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let mut parts = id_token.splitn(3, ':');

        match (parts.next(), parts.next(), parts.next()) {
            (Some("google"), Some(subject), Some(email)) => Ok(VerifiedIdentity {
                subject: subject.to_string(),
                email: email.to_string(),
                name: Some("Google Person".to_string()),
                picture: Some(format!("https://example.com/{}.png", subject)),
            }),
            _ => Err(IdentityError::InvalidToken("unrecognised token".to_string())),
        }
    }
}

/// Test application that spawns a real server on in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(StubIdentityVerifier),
            Authenticator::new(TEST_SECRET),
        ));
        let note_service = Arc::new(NoteService::new(Arc::new(InMemoryNoteRepository::new())));

        let router = create_router(AppState::new(
            auth_service,
            note_service,
            StorageMode::InMemory,
        ));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Sign up a user and return the response body
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/auth/signup")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Sign up a user and return its bearer token
    pub async fn signup_token(&self, email: &str) -> String {
        let body = self.signup("Test User", email, "password123").await;
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a note and return the response body
    pub async fn create_note(&self, token: &str, title: &str, content: &str) -> Value {
        let response = self
            .post("/api/notes")
            .bearer_auth(token)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Sign a token with the test secret and arbitrary timestamps
    pub fn token_with_times(&self, subject: &str, iat: i64, exp: i64) -> String {
        self.jwt_handler
            .encode(&Claims::new(subject, iat, exp))
            .expect("Failed to encode token")
    }
}
