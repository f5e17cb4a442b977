use log::{debug, info};
use std::sync::Arc;
use tokio::sync::Mutex;

use roster_shared::{
    models::{NewUser, User},
    store::UserStore,
};

use crate::{
    error::{AppError, Result},
    models::CreateUser,
    validation::{name_length_in_range, NAME_MAX_CHARS, NAME_MIN_CHARS},
};

pub mod sample_data;

/// Business rules over users: unique emails on create, and a named
/// not-found condition on lookup. Storage mechanics stay in the store.
pub struct UserService<S: UserStore> {
    store: Arc<S>,
    // Held for the whole exists-then-save sequence of create_user
    create_lock: Mutex<()>,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            create_lock: Mutex::new(()),
        }
    }

    /// All users in store order
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        let users = self.store.find_all().await?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    pub async fn get_user_by_id(&self, id: u64) -> Result<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found.", id)))
    }

    /// Creates a user after checking its email is not taken.
    ///
    /// At most one of several concurrent creates with the same email
    /// succeeds: the check and the write run under `create_lock`, and a
    /// duplicate reported by the store itself maps to the same error.
    pub async fn create_user(&self, request: CreateUser) -> Result<User> {
        if !name_length_in_range(&request.name) {
            return Err(AppError::InvalidArgument(format!(
                "Invalid name length: must be between {} and {} characters",
                NAME_MIN_CHARS, NAME_MAX_CHARS
            )));
        }

        let _guard = self.create_lock.lock().await;

        if self.store.exists_by_email(&request.email).await? {
            return Err(AppError::InvalidArgument(format!(
                "Email already exists: {}",
                request.email
            )));
        }

        let user = self
            .store
            .save(NewUser::new(request.name, request.email))
            .await?;

        info!("Created user {} with code {}", user.id, user.code);
        Ok(user)
    }
}
