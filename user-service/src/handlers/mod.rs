pub mod user_handlers;

use axum::Json;
use utoipa::OpenApi;

use roster_shared::models::{ErrorResponse, User};

use crate::{
    error::{AppError, Result},
    models::CreateUserRequest,
};

pub const USERS_TAG: &str = "users";

/// OpenAPI description of the user routes
#[derive(OpenApi)]
#[openapi(
    info(title = "User Service API", description = "Create and look up users"),
    paths(
        user_handlers::get_users,
        user_handlers::get_user,
        user_handlers::create_user,
    ),
    components(schemas(User, CreateUserRequest, ErrorResponse)),
    tags((name = USERS_TAG, description = "User management"))
)]
pub struct ApiDoc;

// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Parses the `{id}` path segment into a user id
pub fn parse_user_id(raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid user ID: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let err = parse_user_id("abc").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Invalid user ID: abc"));
        assert!(parse_user_id("-1").is_err());
    }
}
