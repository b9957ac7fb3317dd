use chrono::Utc;
use salvo::async_trait;

use crate::{
    core::{
        dtos::gym::register_gym_dto::RegisterGymDto,
        entities::models::{Gym, NewGym, UserRole},
        types::errors::gym_error::GymError,
    },
    features::user::repository::UserRepository,
};

use super::repository::GymRepository;

#[async_trait]
pub trait GymService: Send + Sync {
    async fn get_gym(&self, gym_id: i32) -> Result<Gym, GymError>;

    async fn get_my_gyms(&self, owner_id: i32) -> Result<Vec<Gym>, GymError>;

    async fn register_gym(&self, owner_id: i32, data: RegisterGymDto) -> Result<Gym, GymError>;
}

#[derive(Debug, Clone)]
pub struct GymServiceImpl<G: GymRepository, U: UserRepository> {
    gym_repository: G,
    user_repository: U,
}

impl<G: GymRepository, U: UserRepository> GymServiceImpl<G, U> {
    pub fn new(gym_repository: G, user_repository: U) -> Self {
        Self {
            gym_repository,
            user_repository,
        }
    }
}

#[async_trait]
impl<G: GymRepository + Send + Sync, U: UserRepository + Send + Sync> GymService
    for GymServiceImpl<G, U>
{
    async fn get_gym(&self, gym_id: i32) -> Result<Gym, GymError> {
        self.gym_repository.get_gym_by_id(gym_id).await
    }

    async fn get_my_gyms(&self, owner_id: i32) -> Result<Vec<Gym>, GymError> {
        self.gym_repository.get_gyms_by_owner(owner_id).await
    }

    async fn register_gym(&self, owner_id: i32, data: RegisterGymDto) -> Result<Gym, GymError> {
        let owner = self
            .user_repository
            .get_user_by_id(owner_id)
            .await
            .map_err(|_| GymError::UnexpectedError("Owner account not found".to_string()))?;

        if UserRole::from(owner.role) != UserRole::Owner {
            return Err(GymError::Forbidden(
                "Only owner accounts can register a gym".to_string(),
            ));
        }

        let now = Utc::now().naive_utc();

        let new_gym = NewGym {
            name: &data.name,
            image_url: data.image_url.as_deref(),
            address: data.address.as_deref(),
            owner_id: &owner.id,
            created_at: now,
            updated_at: now,
        };

        self.gym_repository.create_gym(new_gym).await
    }
}
