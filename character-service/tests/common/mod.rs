#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
    Router,
};
use character_service::config::CharacterConfig;
use character_service::models::Character;
use character_service::services::{CharacterStore, InMemoryStore};
use character_service::startup::{build_router, AppState, Application};
use service_core::error::AppError;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn router_with_store(store: Arc<dyn CharacterStore>) -> Router {
    build_router(AppState {
        config: CharacterConfig::in_memory(0),
        store,
    })
}

pub fn memory_router() -> (Router, InMemoryStore) {
    let store = InMemoryStore::new();
    (router_with_store(Arc::new(store.clone())), store)
}

/// Sends one request through the router and returns status and raw body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn post_character(character: &Character) -> Request<Body> {
    post_json("/characters", serde_json::to_string(character).unwrap())
}

/// Store whose every call fails the way an unreachable database does.
pub struct FailingStore;

fn unreachable_store() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("server selection timeout"))
}

#[async_trait]
impl CharacterStore for FailingStore {
    async fn list(&self) -> Result<Vec<Character>, AppError> {
        Err(unreachable_store())
    }

    async fn get(&self, _id: i64) -> Result<Option<Character>, AppError> {
        Err(unreachable_store())
    }

    async fn upsert(&self, _character: &Character) -> Result<(), AppError> {
        Err(unreachable_store())
    }

    async fn delete(&self, _id: i64) -> Result<(), AppError> {
        Err(unreachable_store())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(unreachable_store())
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: InMemoryStore,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = InMemoryStore::new();
        let app = Application::with_store(CharacterConfig::in_memory(0), Arc::new(store.clone()))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            port,
            store,
        }
    }
}
