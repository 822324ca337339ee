//! User repository and service traits.

use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;

/// Persistence contract for users.
///
/// Lookups only ever return active (not soft-deleted) users.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Finds an active user by id.
    fn find_active(&self, user_id: &str) -> Result<Option<User>>;

    /// Soft-deletes a user. Returns the number of rows affected.
    async fn soft_delete(&self, user_id: &str) -> Result<usize>;
}

/// User lookup capability consumed by the other domain services.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Returns the active user or `Error::UserNotFound`.
    fn get_user(&self, user_id: &str) -> Result<User>;
}
