#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde_json::{json, Value};

use drinks_api::auth::{InMemoryKeyStore, TokenVerifier};
use drinks_api::config::AppConfig;
use drinks_api::database::{DatabaseManager, DrinkRepository};
use drinks_api::{app, AppState};

pub const KID: &str = "test-signing-key";
pub const AUDIENCE: &str = "drinks";
pub const DOMAIN: &str = "drinks.test";

const PRIVATE_KEY: &str = include_str!("../fixtures/rsa_private.pem");
const PUBLIC_KEY: &str = include_str!("../fixtures/rsa_public.pem");

pub const ALL_SCOPES: &[&str] = &[
    "get:drinks-detail",
    "post:drinks",
    "patch:drinks",
    "delete:drinks",
];

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.server.enable_request_logging = false;
    config.auth.domain = DOMAIN.to_string();
    config.auth.audience = AUDIENCE.to_string();
    config.auth.algorithms = vec![Algorithm::RS256];
    config
}

/// Start the router on an ephemeral port with its own empty in-memory store
pub async fn spawn_server() -> Result<TestServer> {
    let config = test_config();

    let pool = DatabaseManager::connect_in_memory().await?;
    DatabaseManager::drop_and_create_all(&pool).await?;

    let key = DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).context("bad test public key")?;
    let verifier = TokenVerifier::new(Arc::new(InMemoryKeyStore::new().with_key(KID, key)), &config.auth);

    let router = app(AppState::new(DrinkRepository::new(pool), verifier), &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    })
}

/// Claims a well-formed token for this server would carry
pub fn claims(scopes: &[&str]) -> Value {
    json!({
        "iss": format!("https://{}/", DOMAIN),
        "aud": AUDIENCE,
        "sub": "auth0|barista",
        "iat": chrono::Utc::now().timestamp(),
        "exp": chrono::Utc::now().timestamp() + 3600,
        "permissions": scopes,
    })
}

pub fn sign(claims: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(KID.to_string());
    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).expect("test private key");
    encode(&header, claims, &key).expect("sign test token")
}

/// `Bearer` header value for a token holding `scopes`
pub fn bearer(scopes: &[&str]) -> String {
    format!("Bearer {}", sign(&claims(scopes)))
}

pub fn manager() -> String {
    bearer(ALL_SCOPES)
}

pub fn water() -> Value {
    json!({
        "title": "Water",
        "recipe": [{"name": "H2O", "color": "blue", "parts": 1}]
    })
}

/// Create a drink with a manager token and return its id
pub async fn create_drink(server: &TestServer, body: &Value) -> Result<i64> {
    let res = server
        .client
        .post(server.url("/drinks"))
        .header("Authorization", manager())
        .json(body)
        .send()
        .await?;
    anyhow::ensure!(res.status().is_success(), "create failed: {}", res.status());

    let body: Value = res.json().await?;
    body["drinks"][0]["id"].as_i64().context("created drink has no id")
}
