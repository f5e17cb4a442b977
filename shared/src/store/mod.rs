use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewUser, User};

// Expose the DynamoDB store module
pub mod dynamo;
// In-memory store used for local runs and tests
pub mod memory;

/// UserStore trait defining the interface for user storage implementations
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Gets all users, ordered by id
    async fn find_all(&self) -> Result<Vec<User>>;

    /// Gets a user by ID, `None` when no such user exists
    async fn find_by_id(&self, id: u64) -> Result<Option<User>>;

    /// Saves a new user and returns it with its assigned id.
    ///
    /// Implementations must reject an email that is already stored with
    /// `StoreError::DuplicateEmail`, atomically with the write.
    async fn save(&self, user: NewUser) -> Result<User>;

    /// Checks whether any user holds the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
}
