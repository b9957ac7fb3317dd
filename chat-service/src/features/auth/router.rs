use salvo::oapi::extract::JsonBody;
use salvo::prelude::*;

use crate::core::dtos::auth::create_token_dto::CreateTokenDto;
use crate::core::types::errors::auth_error::AuthError;
use crate::core::types::responses::auth_response::AuthResponse;
use crate::core::utils::jwt_utils::JwtUtils;
use crate::features::auth::repository::AuthRepositoryImpl;

use super::service::{AuthService, AuthServiceImpl};

pub fn get_auth_router(jwt_utils: JwtUtils) -> Router {
    Router::new()
        .path("auth")
        .post(create_token)
        .push(Router::with_hoop(jwt_utils.refresh_token_middleware()).get(refresh_token))
}

/// Create token
#[endpoint(tags("auth"), status_codes(201, 400, 401, 500))]
async fn create_token(
    _res: &mut Response,
    data: JsonBody<CreateTokenDto>,
    depot: &mut Depot,
) -> Result<AuthResponse, AuthError> {
    let auth_service = depot
        .obtain::<AuthServiceImpl<AuthRepositoryImpl>>()
        .unwrap();
    let jwt_utils = depot.obtain::<JwtUtils>().unwrap();

    let auth_response = auth_service
        .login_with_social(data.0, jwt_utils.clone())
        .await?;

    Ok(auth_response)
}

/// Renew token
#[endpoint(tags("auth"), status_codes(200, 400, 401, 404, 500))]
async fn refresh_token(_res: &mut Response, depot: &mut Depot) -> Result<AuthResponse, AuthError> {
    let user_id = depot.get::<String>("user_id").unwrap();
    let auth_service = depot
        .obtain::<AuthServiceImpl<AuthRepositoryImpl>>()
        .unwrap();
    let jwt_utils = depot.obtain::<JwtUtils>().unwrap();

    let auth_response = auth_service
        .refresh_token(jwt_utils.clone(), user_id.parse().unwrap())
        .await?;

    Ok(auth_response)
}
