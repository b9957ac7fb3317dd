use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::core::{
    dtos::gym::register_gym_dto::RegisterGymDto,
    entities::models::Gym,
    types::{errors::gym_error::GymError, responses::gym_response::ListGymResponse},
    utils::jwt_utils::JwtUtils,
};
use crate::features::{gym::repository::GymRepositoryImpl, user::repository::UserRepositoryImpl};

use super::service::{GymService, GymServiceImpl};

type GymServices = GymServiceImpl<GymRepositoryImpl, UserRepositoryImpl>;

pub fn get_gym_router(jwt_utils: JwtUtils) -> Router {
    Router::with_hoop(jwt_utils.auth_middleware())
        .path("gyms")
        .post(register_gym)
        .get(get_my_gyms)
        .push(Router::with_path("{gym_id}").get(get_gym))
}

/// Get a gym by id
#[endpoint(tags("gyms"), status_codes(200, 400, 401, 404, 500))]
async fn get_gym(
    _res: &mut Response,
    gym_id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Gym, GymError> {
    let gym_service = depot.obtain::<GymServices>().unwrap();

    let gym = gym_service.get_gym(gym_id.into_inner()).await?;

    Ok(gym)
}

/// List the gyms owned by the authenticated user
#[endpoint(tags("gyms"), status_codes(200, 400, 401, 500))]
async fn get_my_gyms(_res: &mut Response, depot: &mut Depot) -> Result<ListGymResponse, GymError> {
    let gym_service = depot.obtain::<GymServices>().unwrap();
    let user_id = depot.get::<String>("user_id").unwrap();

    let gyms = gym_service.get_my_gyms(user_id.parse().unwrap()).await?;

    Ok(ListGymResponse { gyms })
}

/// Register a gym owned by the authenticated user
#[endpoint(tags("gyms"), status_codes(201, 400, 401, 403, 500))]
async fn register_gym(
    _res: &mut Response,
    data: JsonBody<RegisterGymDto>,
    depot: &mut Depot,
) -> Result<Gym, GymError> {
    let gym_service = depot.obtain::<GymServices>().unwrap();
    let user_id = depot.get::<String>("user_id").unwrap();

    let gym = gym_service
        .register_gym(user_id.parse().unwrap(), data.0)
        .await?;

    Ok(gym)
}
