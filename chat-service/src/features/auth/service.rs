use chrono::Utc;
use salvo::async_trait;

use crate::core::{
    dtos::auth::create_token_dto::CreateTokenDto,
    entities::models::{NewUser, UserRole},
    types::{errors::auth_error::AuthError, responses::auth_response::AuthResponse},
    utils::jwt_utils::JwtUtils,
};

use super::repository::AuthRepository;

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login_with_social(
        &self,
        data: CreateTokenDto,
        jwt_utils: JwtUtils,
    ) -> Result<AuthResponse, AuthError>;

    async fn refresh_token(
        &self,
        jwt_utils: JwtUtils,
        user_id: i32,
    ) -> Result<AuthResponse, AuthError>;
}

#[derive(Debug, Clone)]
pub struct AuthServiceImpl<R: AuthRepository> {
    repository: R,
}

impl<R: AuthRepository> AuthServiceImpl<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn issue_tokens(jwt_utils: &JwtUtils, user_id: i32) -> (String, String) {
        let token = jwt_utils.generate_token(&user_id.to_string());
        let refresh_token = jwt_utils.generate_refresh_token(&user_id.to_string());
        (token, refresh_token)
    }
}

#[async_trait]
impl<R: AuthRepository + Send + Sync> AuthService for AuthServiceImpl<R> {
    async fn login_with_social(
        &self,
        data: CreateTokenDto,
        jwt_utils: JwtUtils,
    ) -> Result<AuthResponse, AuthError> {
        let existing = self
            .repository
            .get_user_by_external_id(&data.external_id)
            .await;

        if let Ok(user) = existing {
            let (token, refresh_token) = Self::issue_tokens(&jwt_utils, user.id);

            return Ok(AuthResponse {
                token,
                refresh_token,
                user: Some(user),
            });
        }

        let now = Utc::now().naive_utc();
        let role = data.role.unwrap_or(UserRole::Member as i16);

        let new_user = NewUser {
            name: &data.name,
            image_url: data.image_url.as_deref(),
            role: &role,
            external_id: &data.external_id,
            created_at: now,
            updated_at: now,
        };

        let user = self.repository.create_user(new_user).await?;

        let (token, refresh_token) = Self::issue_tokens(&jwt_utils, user.id);

        Ok(AuthResponse {
            token,
            refresh_token,
            user: Some(user),
        })
    }

    async fn refresh_token(
        &self,
        jwt_utils: JwtUtils,
        user_id: i32,
    ) -> Result<AuthResponse, AuthError> {
        let user = self.repository.get_user_by_id(user_id).await?;

        let (token, refresh_token) = Self::issue_tokens(&jwt_utils, user.id);

        Ok(AuthResponse {
            token,
            refresh_token,
            user: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entities::models::User;
    use crate::core::env::app_env::{AppEnv, DbUri, JwtConfig, TlsConfig};
    use chrono::DateTime;

    fn sample_user(id: i32, external_id: &str) -> User {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        User {
            id,
            name: "Alice".to_string(),
            image_url: Some("a.png".to_string()),
            role: UserRole::Member as i16,
            external_id: external_id.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_create_token_dto() -> CreateTokenDto {
        CreateTokenDto {
            external_id: "ext-1".to_string(),
            name: "Alice".to_string(),
            image_url: None,
            role: None,
        }
    }

    fn dummy_app_env() -> AppEnv {
        AppEnv {
            app_port: 3000,
            api_prefix: "gymapi/v1".to_string(),
            db_uri: DbUri("postgres://localhost/test".to_string()),
            jwt: JwtConfig {
                jwt_token: "secret".to_string(),
                refresh_token: "refresh_secret".to_string(),
                token_expires_in_seconds: 3600,
                refresh_token_expires_in_seconds: 7200,
            },
            tls: TlsConfig {
                enabled: false,
                cert_path: "certificates/cert.pem".to_string(),
                key_path: "certificates/key.pem".to_string(),
            },
        }
    }

    struct MockAuthRepository {
        pub existing_user: Option<User>,
        pub create_user_result: Result<User, AuthError>,
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn get_user_by_external_id(&self, _external_id: &str) -> Result<User, AuthError> {
            match &self.existing_user {
                Some(user) => Ok(user.clone()),
                None => Err(AuthError::Unauthorized),
            }
        }

        async fn get_user_by_id(&self, user_id: i32) -> Result<User, AuthError> {
            match &self.existing_user {
                Some(user) => Ok(user.clone()),
                None => Err(AuthError::UserNotFound(user_id)),
            }
        }

        async fn create_user(&self, _user: NewUser<'_>) -> Result<User, AuthError> {
            self.create_user_result.clone()
        }
    }

    #[tokio::test]
    async fn login_returns_tokens_for_existing_user() {
        let user = sample_user(1, "ext-1");
        let repo = MockAuthRepository {
            existing_user: Some(user.clone()),
            create_user_result: Ok(user.clone()),
        };
        let service = AuthServiceImpl::new(repo);
        let jwt_utils = JwtUtils::new(dummy_app_env());

        let result = service
            .login_with_social(sample_create_token_dto(), jwt_utils)
            .await
            .unwrap();

        assert_eq!(result.user.unwrap().id, 1);
        assert!(!result.token.is_empty());
        assert!(!result.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn login_creates_user_when_unknown() {
        let user = sample_user(2, "ext-1");
        let repo = MockAuthRepository {
            existing_user: None,
            create_user_result: Ok(user.clone()),
        };
        let service = AuthServiceImpl::new(repo);
        let jwt_utils = JwtUtils::new(dummy_app_env());

        let result = service
            .login_with_social(sample_create_token_dto(), jwt_utils)
            .await
            .unwrap();

        assert_eq!(result.user.unwrap().id, 2);
    }

    #[tokio::test]
    async fn login_fails_when_user_creation_fails() {
        let repo = MockAuthRepository {
            existing_user: None,
            create_user_result: Err(AuthError::UnexpectedError(
                "Failed to create new user".to_string(),
            )),
        };
        let service = AuthServiceImpl::new(repo);
        let jwt_utils = JwtUtils::new(dummy_app_env());

        let result = service
            .login_with_social(sample_create_token_dto(), jwt_utils)
            .await;

        assert!(matches!(result, Err(AuthError::UnexpectedError(_))));
    }

    #[tokio::test]
    async fn refresh_token_requires_known_user() {
        let repo = MockAuthRepository {
            existing_user: None,
            create_user_result: Err(AuthError::UnexpectedError("not used".to_string())),
        };
        let service = AuthServiceImpl::new(repo);
        let jwt_utils = JwtUtils::new(dummy_app_env());

        let result = service.refresh_token(jwt_utils, 42).await;

        assert!(matches!(result, Err(AuthError::UserNotFound(42))));
    }

    #[tokio::test]
    async fn refresh_token_omits_user_payload() {
        let repo = MockAuthRepository {
            existing_user: Some(sample_user(1, "ext-1")),
            create_user_result: Err(AuthError::UnexpectedError("not used".to_string())),
        };
        let service = AuthServiceImpl::new(repo);
        let jwt_utils = JwtUtils::new(dummy_app_env());

        let result = service.refresh_token(jwt_utils, 1).await.unwrap();

        assert!(result.user.is_none());
        assert!(!result.token.is_empty());
    }
}
