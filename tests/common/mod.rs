//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use locallibrary_server::{
    api,
    models::{Author, NewAuthor, NewBook},
    repository::{memory::MemoryStore, CatalogStore},
    services::Services,
    AppConfig, AppState,
};

/// Build the full router over a fresh in-memory store.
///
/// The store is returned as well so tests can seed records directly.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(store.clone() as Arc<dyn CatalogStore>)),
    };
    (api::router(state), store)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// POST an already urlencoded form body
pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn seed_author(store: &MemoryStore, first: &str, family: &str) -> Author {
    store
        .authors_create(&NewAuthor {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: None,
            date_of_death: None,
        })
        .await
        .unwrap()
}

pub async fn seed_book(store: &MemoryStore, title: &str, author: &Author) {
    store
        .books_create(&NewBook {
            title: title.to_string(),
            author_id: author.id,
            summary: format!("{} summary", title),
            isbn: "9780000000000".to_string(),
            genre: vec![],
        })
        .await
        .unwrap();
}
