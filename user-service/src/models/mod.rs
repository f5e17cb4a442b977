use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request DTOs

/// Body of `POST /users`. Fields are optional so that a missing field
/// reaches validation and is reported as required.
#[derive(Deserialize, Serialize, Debug, Default, Clone, ToSchema)]
pub struct CreateUserRequest {
    /// Name of the user
    #[serde(default)]
    #[schema(example = "John Doe", min_length = 3, max_length = 50)]
    pub name: Option<String>,
    /// Email of the user
    #[serde(default)]
    #[schema(example = "johndoe@example.com")]
    pub email: Option<String>,
}

/// A creation request that passed boundary validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}
