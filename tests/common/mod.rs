#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use lists_api::auth::{issue_token, JwtVerifier};
use lists_api::config::AppConfig;
use lists_api::database::MemoryListStore;
use lists_api::{app, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

/// A signed-in test user
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        let token = issue_token(JWT_SECRET, id, 1).expect("failed to sign test token");
        Self { id, token }
    }
}

/// Start the real router on an ephemeral port with a fresh in-memory store.
///
/// Each test gets its own server so stored lists never leak between tests.
pub async fn spawn_server() -> Result<TestServer> {
    let config = AppConfig::for_tests(JWT_SECRET);
    let verifier = JwtVerifier::new(JWT_SECRET).context("failed to build verifier")?;
    let state = AppState::new(Arc::new(MemoryListStore::new()), Arc::new(verifier), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("test server");
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create_list(&self, user: &TestUser, list: Value) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/lists"))
            .bearer_auth(&user.token)
            .json(&json!({ "list": list }))
            .send()
            .await?)
    }

    /// Create a list and return its JSON representation, asserting 201
    pub async fn create_list_ok(&self, user: &TestUser, list: Value) -> Result<Value> {
        let res = self.create_list(user, list).await?;
        assert_eq!(res.status(), StatusCode::CREATED, "expected 201 Created, got {}", res.status());
        let body = res.json::<Value>().await?;
        Ok(body["list"].clone())
    }

    pub async fn get_list(&self, id: &str) -> Result<Response> {
        Ok(self.client.get(self.url(&format!("/lists/{}", id))).send().await?)
    }

    pub async fn update_list(&self, user: &TestUser, id: &str, list: Value) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(&format!("/lists/{}", id)))
            .bearer_auth(&user.token)
            .json(&json!({ "list": list }))
            .send()
            .await?)
    }

    pub async fn delete_list(&self, user: &TestUser, id: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(&format!("/lists/{}", id)))
            .bearer_auth(&user.token)
            .send()
            .await?)
    }
}

/// Id of a list as returned in a response body
pub fn list_id(list: &Value) -> String {
    list["id"].as_str().expect("list id missing").to_string()
}
