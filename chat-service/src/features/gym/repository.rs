use diesel::{
    ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper,
    dsl::insert_into,
    r2d2::{ConnectionManager, Pool, PooledConnection},
};
use salvo::async_trait;

use crate::core::{
    database::schema::gyms,
    entities::models::{Gym, NewGym},
    types::errors::{general::GeneralError, gym_error::GymError},
};

#[async_trait]
pub trait GymRepository {
    async fn get_gym_by_id(&self, gym_id: i32) -> Result<Gym, GymError>;
    async fn get_gyms_by_owner(&self, owner_id: i32) -> Result<Vec<Gym>, GymError>;
    async fn create_gym(&self, gym: NewGym<'_>) -> Result<Gym, GymError>;
}

#[derive(Debug, Clone)]
pub struct GymRepositoryImpl {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl GymRepositoryImpl {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, GeneralError> {
        self.pool.get().map_err(|_| GeneralError::DbConnectionError)
    }
}

#[async_trait]
impl GymRepository for GymRepositoryImpl {
    async fn get_gym_by_id(&self, gym_id: i32) -> Result<Gym, GymError> {
        let mut conn = self.get_conn()?;

        let gym = gyms::table
            .filter(gyms::id.eq(gym_id))
            .filter(gyms::deleted_at.is_null())
            .first::<Gym>(&mut conn);

        match gym {
            Ok(gym) => Ok(gym),
            Err(_) => Err(GymError::GymNotFound(gym_id)),
        }
    }

    async fn get_gyms_by_owner(&self, owner_id: i32) -> Result<Vec<Gym>, GymError> {
        let mut conn = self.get_conn()?;

        let result = gyms::table
            .filter(gyms::owner_id.eq(owner_id))
            .filter(gyms::deleted_at.is_null())
            .order(gyms::created_at.asc())
            .select(Gym::as_select())
            .load::<Gym>(&mut conn)
            .map_err(|_| GymError::UnexpectedError("Failed to list gyms".to_string()))?;

        Ok(result)
    }

    async fn create_gym(&self, gym: NewGym<'_>) -> Result<Gym, GymError> {
        let mut conn = self.get_conn()?;

        let new_gym = insert_into(gyms::table)
            .values(&gym)
            .returning(Gym::as_select())
            .get_result(&mut conn);

        match new_gym {
            Ok(gym) => Ok(gym),
            Err(_) => Err(GymError::UnexpectedError(
                "Failed to register gym".to_string(),
            )),
        }
    }
}
