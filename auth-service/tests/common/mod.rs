#![allow(dead_code)]

use std::sync::Arc;

use auth_service::account::ports::AccountRepository;
use auth_service::account::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryAccountRepository;
use auth_service::outbound::tokens::JwtTokenIssuer;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "auth-service";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryAccountRepository>,
    pub api_client: reqwest::Client,
    pub token_issuer: JwtTokenIssuer,
}

impl TestApp {
    /// Spawn the application backed by an in-memory store
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let (address, port) = spawn_server(Arc::clone(&repository)).await;

        Self {
            address,
            port,
            repository,
            api_client: reqwest::Client::new(),
            token_issuer: token_issuer(),
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

    pub async fn signup(&self, identifier: &str, secret: &str) -> reqwest::Response {
        self.post("/api/auth/signup")
            .json(&serde_json::json!({ "identifier": identifier, "secret": secret }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, identifier: &str, secret: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({ "identifier": identifier, "secret": secret }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn token_issuer() -> JwtTokenIssuer {
    JwtTokenIssuer::new(JWT_SECRET, JWT_ISSUER, 24)
}

pub fn password_hasher() -> auth::PasswordHasher {
    auth::PasswordHasher::with_cost(1024, 1, 1).expect("Invalid hashing cost")
}

/// Serve the router for `repository` on a random port
pub async fn spawn_server<AR: AccountRepository>(repository: Arc<AR>) -> (String, u16) {
    // Use random port (0 = OS assigns)
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let auth_service = Arc::new(
        AuthService::new(repository, Arc::new(token_issuer()), password_hasher())
            .expect("Failed to create auth service"),
    );

    let router = create_router(auth_service, &[]);

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    (address, port)
}
