use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use log::debug;
use std::sync::Arc;

use roster_shared::{
    models::{ErrorResponse, User},
    store::UserStore,
};

use super::{parse_user_id, USERS_TAG};
use crate::{
    error::{AppError, Result},
    models::CreateUserRequest,
    service::UserService,
    validation::validate_create_user,
};

// GET /users
#[utoipa::path(
    get,
    path = "/users",
    tag = USERS_TAG,
    responses(
        (status = 200, description = "All users, ordered by id", body = Vec<User>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_users<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
) -> Result<Json<Vec<User>>> {
    let users = service.get_all_users().await?;
    Ok(Json(users))
}

// GET /users/:id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USERS_TAG,
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_user<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let id = parse_user_id(&id)?;
    let user = service.get_user_by_id(id).await?;
    Ok(Json(user))
}

// POST /users
#[utoipa::path(
    post,
    path = "/users",
    tag = USERS_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation failed, malformed body or email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_user<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    debug!("Create user request: {:?}", request);

    let create = validate_create_user(request).map_err(AppError::ValidationFailed)?;
    let user = service.create_user(create).await?;

    Ok((StatusCode::CREATED, Json(user)))
}
