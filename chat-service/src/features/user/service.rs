use chrono::Utc;
use salvo::async_trait;

use crate::core::{
    dtos::user::update_user_dto::UpdateUserDto, entities::models::User,
    types::errors::user_error::UserError,
};

use super::repository::UserRepository;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, user_id: i32) -> Result<User, UserError>;

    async fn update_profile(&self, user_id: i32, data: UpdateUserDto) -> Result<User, UserError>;
}

#[derive(Debug, Clone)]
pub struct UserServiceImpl<U: UserRepository> {
    user_repository: U,
}

impl<U: UserRepository> UserServiceImpl<U> {
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl<U: UserRepository + Send + Sync> UserService for UserServiceImpl<U> {
    async fn get_user(&self, user_id: i32) -> Result<User, UserError> {
        self.user_repository.get_user_by_id(user_id).await
    }

    async fn update_profile(&self, user_id: i32, data: UpdateUserDto) -> Result<User, UserError> {
        let mut user = self.user_repository.get_user_by_id(user_id).await?;

        if let Some(name) = data.name {
            user.name = name;
        }

        if let Some(image_url) = data.image_url {
            user.image_url = Some(image_url);
        }

        user.updated_at = Utc::now().naive_utc();

        self.user_repository.update_user(user).await
    }
}
