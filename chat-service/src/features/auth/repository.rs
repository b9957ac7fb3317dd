use diesel::{
    ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper,
    dsl::insert_into,
    r2d2::{ConnectionManager, Pool, PooledConnection},
};
use salvo::async_trait;

use crate::core::{
    database::schema::users,
    entities::models::{NewUser, User},
    types::errors::{auth_error::AuthError, general::GeneralError},
};

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn get_user_by_external_id(&self, external_id: &str) -> Result<User, AuthError>;

    async fn get_user_by_id(&self, user_id: i32) -> Result<User, AuthError>;

    async fn create_user(&self, user: NewUser<'_>) -> Result<User, AuthError>;
}

#[derive(Debug, Clone)]
pub struct AuthRepositoryImpl {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl AuthRepositoryImpl {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, GeneralError> {
        self.pool.get().map_err(|_| GeneralError::DbConnectionError)
    }
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn get_user_by_external_id(&self, external_id: &str) -> Result<User, AuthError> {
        let mut conn = self.get_conn()?;

        let user = users::table
            .filter(users::external_id.eq(external_id))
            .first::<User>(&mut conn);

        match user {
            Ok(user) => Ok(user),
            Err(_) => Err(AuthError::Unauthorized),
        }
    }

    async fn get_user_by_id(&self, user_id: i32) -> Result<User, AuthError> {
        let mut conn = self.get_conn()?;

        let user = users::table
            .filter(users::id.eq(user_id))
            .first::<User>(&mut conn);

        match user {
            Ok(user) => Ok(user),
            Err(_) => Err(AuthError::UserNotFound(user_id)),
        }
    }

    async fn create_user(&self, user: NewUser<'_>) -> Result<User, AuthError> {
        let mut conn = self.get_conn()?;

        let new_user = insert_into(users::table)
            .values(&user)
            .returning(User::as_select())
            .get_result(&mut conn);

        match new_user {
            Ok(user) => Ok(user),
            Err(_) => Err(AuthError::UnexpectedError(
                "Failed to create new user".to_string(),
            )),
        }
    }
}
