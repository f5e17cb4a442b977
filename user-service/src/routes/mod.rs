use axum::{extract::Request, http::StatusCode, middleware, routing::get, Router};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use roster_shared::store::{dynamo::DynamoUserStore, memory::MemoryUserStore, UserStore};

use crate::{
    config::{Config, StoreBackend},
    error::{error_response, Result},
    handlers::{
        openapi_json,
        user_handlers::{create_user, get_user, get_users},
    },
    service::{sample_data::seed_sample_users, UserService},
};

/// Creates a router backed by the store the configuration selects,
/// seeding sample users when the profile asks for them
pub async fn create_router(config: &Config) -> Result<Router> {
    match config.store {
        StoreBackend::Memory => {
            info!("Creating router with in-memory store");
            build_router(Arc::new(MemoryUserStore::new()), config).await
        }
        StoreBackend::DynamoDb => {
            info!("Creating router with DynamoDB store");
            let store = DynamoUserStore::new(config.table_name.clone()).await;
            build_router(Arc::new(store), config).await
        }
    }
}

async fn build_router<S: UserStore>(store: Arc<S>, config: &Config) -> Result<Router> {
    let service = Arc::new(UserService::new(store));

    if config.profile.seeds_sample_data() {
        seed_sample_users(&service).await?;
    }

    Ok(create_router_with_service(service, &config.base_path))
}

/// Creates a router with a given store implementation
pub fn create_router_with_store<S: UserStore>(store: Arc<S>, prefix: &str) -> Router {
    create_router_with_service(Arc::new(UserService::new(store)), prefix)
}

pub fn create_router_with_service<S: UserStore>(
    service: Arc<UserService<S>>,
    prefix: &str,
) -> Router {
    info!("Setting up API routes with prefix: '{}'", prefix);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    let api_routes = Router::new()
        .route("/users", get(get_users::<S>).post(create_user::<S>))
        .route("/users/:id", get(get_user::<S>))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(service);

    let router = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(prefix, api_routes)
    };

    // Add a fallback handler for 404s
    router
        .fallback(|req: Request| async move {
            warn!("No route matched for: {} {}", req.method(), req.uri());
            error_response(
                StatusCode::NOT_FOUND,
                "Not found",
                format!("No route for {} {}", req.method(), req.uri().path()),
            )
        })
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
