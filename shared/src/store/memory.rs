use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::UserStore;
use crate::error::{Result, StoreError};
use crate::models::{NewUser, User};

#[derive(Default)]
struct MemoryState {
    users: BTreeMap<u64, User>,
    last_id: u64,
}

/// In-memory implementation of UserStore
#[derive(Default)]
pub struct MemoryUserStore {
    state: RwLock<MemoryState>,
}

impl MemoryUserStore {
    /// Creates a new empty in-memory user store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory store holding the given users as-is.
    /// New ids continue after the highest seeded id.
    pub fn with_data(initial_data: Vec<User>) -> Self {
        let mut state = MemoryState::default();
        for user in initial_data {
            state.last_id = state.last_id.max(user.id);
            state.users.insert(user.id, user);
        }

        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::InternalError("Failed to acquire read lock".into()))?;

        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::InternalError("Failed to acquire read lock".into()))?;

        Ok(state.users.get(&id).cloned())
    }

    async fn save(&self, user: NewUser) -> Result<User> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StoreError::InternalError("Failed to acquire write lock".into()))?;

        if state.users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::InternalError("User id sequence exhausted".into()))?;
        state.last_id = id;
        let saved = user.into_user(id);
        state.users.insert(saved.id, saved.clone());

        Ok(saved)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::InternalError("Failed to acquire read lock".into()))?;

        Ok(state.users.values().any(|user| user.email == email))
    }
}
