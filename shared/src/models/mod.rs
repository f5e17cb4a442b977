use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted user. `id` is assigned by the store and never changes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "johndoe@example.com")]
    pub email: String,
    /// Generated at creation, display only
    #[schema(example = "USER-1700000000000")]
    pub code: String,
}

/// A user that has not been saved yet, so it has no id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub code: String,
}

impl NewUser {
    /// Builds a new user with a freshly generated display code.
    pub fn new(name: String, email: String) -> Self {
        Self {
            name,
            email,
            code: generate_user_code(),
        }
    }

    /// Attaches the id handed out by the store.
    pub fn into_user(self, id: u64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            code: self.code,
        }
    }
}

// Response DTOs for general use across services
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "User not found")]
    pub error: String,
    #[serde(rename = "httpStatus")]
    #[schema(example = "404 NOT_FOUND")]
    pub http_status: String,
    #[schema(example = "User with ID 999 not found.")]
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, http_status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            http_status: http_status.into(),
            message: message.into(),
            timestamp: now_str(),
        }
    }
}

// Helper function to get current timestamp as string
pub fn now_str() -> String {
    Utc::now().to_rfc3339()
}

/// Display code derived from creation time. Not unique, only present.
pub fn generate_user_code() -> String {
    format!("USER-{}", Utc::now().timestamp_millis())
}
