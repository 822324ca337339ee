use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let user = self.repository.create(new_user).await?;
        debug!("Created user {} ({})", user.id, user.role);
        Ok(user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .find_active(user_id)?
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))
    }
}
