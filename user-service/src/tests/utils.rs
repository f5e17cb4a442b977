use async_trait::async_trait;
use axum::{
    body::Body,
    http::Request,
    Router,
};
use mockall::mock;
use serde_json::Value;
use std::sync::Arc;

use roster_shared::{
    error::Result,
    models::{NewUser, User},
    store::{memory::MemoryUserStore, UserStore},
    test_utils::test_logging::init_test_logging,
};

use crate::routes;

mock! {
    pub Store {}

    #[async_trait]
    impl UserStore for Store {
        async fn find_all(&self) -> Result<Vec<User>>;
        async fn find_by_id(&self, id: u64) -> Result<Option<User>>;
        async fn save(&self, user: NewUser) -> Result<User>;
        async fn exists_by_email(&self, email: &str) -> Result<bool>;
    }
}

// Helper function to create test request
pub fn create_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().uri(uri).method(method);

    if let Some(json_body) = body {
        builder
            .header("Content-Type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

// Helper for a raw (possibly malformed) JSON body
pub fn create_raw_json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn john_doe() -> User {
    User {
        id: 1,
        name: "John Doe".into(),
        email: "john.doe@example.com".into(),
        code: "123".into(),
    }
}

pub fn jane_smith() -> User {
    User {
        id: 2,
        name: "Jane Smith".into(),
        email: "jane.smith@example.com".into(),
        code: "456".into(),
    }
}

// Helper for setting up a test router over an in-memory store
pub fn create_test_app_with_users(users: Vec<User>) -> (Router, Arc<MemoryUserStore>) {
    init_test_logging();
    let store = Arc::new(MemoryUserStore::with_data(users));
    let app = routes::create_router_with_store(store.clone(), "");
    (app, store)
}

pub fn create_test_app() -> (Router, Arc<MemoryUserStore>) {
    create_test_app_with_users(Vec::new())
}
