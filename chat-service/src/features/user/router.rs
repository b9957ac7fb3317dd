use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::core::{
    dtos::user::update_user_dto::UpdateUserDto, entities::models::User,
    types::errors::user_error::UserError, utils::jwt_utils::JwtUtils,
};
use crate::features::user::repository::UserRepositoryImpl;

use super::service::{UserService, UserServiceImpl};

pub fn get_user_router(jwt_utils: JwtUtils) -> Router {
    Router::with_hoop(jwt_utils.auth_middleware())
        .path("users")
        .push(Router::with_path("me").get(get_me))
        .push(Router::with_path("{user_id}").get(get_user))
        .put(update_profile)
}

/// Get the authenticated user's profile
#[endpoint(tags("users"), status_codes(200, 400, 401, 404, 500))]
async fn get_me(_res: &mut Response, depot: &mut Depot) -> Result<User, UserError> {
    let user_service = depot
        .obtain::<UserServiceImpl<UserRepositoryImpl>>()
        .unwrap();
    let user_id = depot.get::<String>("user_id").unwrap();

    let user = user_service.get_user(user_id.parse().unwrap()).await?;

    Ok(user)
}

/// Get a user by id
#[endpoint(tags("users"), status_codes(200, 400, 401, 404, 500))]
async fn get_user(
    _res: &mut Response,
    user_id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<User, UserError> {
    let user_service = depot
        .obtain::<UserServiceImpl<UserRepositoryImpl>>()
        .unwrap();

    let user = user_service.get_user(user_id.into_inner()).await?;

    Ok(user)
}

/// Update the authenticated user's profile
#[endpoint(tags("users"), status_codes(200, 400, 401, 404, 500))]
async fn update_profile(
    _res: &mut Response,
    data: JsonBody<UpdateUserDto>,
    depot: &mut Depot,
) -> Result<User, UserError> {
    let user_service = depot
        .obtain::<UserServiceImpl<UserRepositoryImpl>>()
        .unwrap();
    let user_id = depot.get::<String>("user_id").unwrap();

    let user = user_service
        .update_profile(user_id.parse().unwrap(), data.0)
        .await?;

    Ok(user)
}
