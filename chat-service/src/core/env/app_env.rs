use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppEnv {
    pub app_port: u16,
    pub api_prefix: String,
    pub db_uri: DbUri,
    pub jwt: JwtConfig,
    pub tls: TlsConfig,
}

#[derive(Debug, Clone)]
pub struct DbUri(pub String);

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_token: String,
    pub refresh_token: String,
    pub token_expires_in_seconds: i64,
    pub refresh_token_expires_in_seconds: i64,
}

#[derive(Debug, Clone)]
pub struct TlsConfig {
    pub enabled: bool,
    pub cert_path: String,
    pub key_path: String,
}

impl Default for AppEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEnv {
    pub fn new() -> Self {
        dotenv().ok();

        Self {
            app_port: Self::get_port_env("APP_PORT", 3000),
            api_prefix: Self::get_str_env("API_PREFIX", "gymapi/v1".to_owned()),
            db_uri: DbUri(env::var("DATABASE_URL").expect("DATABASE_URL must be set")),
            jwt: JwtConfig {
                jwt_token: env::var("AUTH_JWT_SECRET").expect("AUTH_JWT_SECRET must be set"),
                refresh_token: env::var("AUTH_REFRESH_SECRET")
                    .expect("AUTH_REFRESH_SECRET must be set"),
                token_expires_in_seconds: Self::get_dur_env("AUTH_JWT_TOKEN_EXPIRES_IN", 86_400), // a day
                refresh_token_expires_in_seconds: Self::get_dur_env(
                    "AUTH_REFRESH_TOKEN_EXPIRES_IN",
                    31_536_000, // a year
                ),
            },
            tls: TlsConfig {
                enabled: env::var("TLS_ENABLED")
                    .unwrap_or_else(|_| "false".into())
                    .to_lowercase()
                    == "true",
                cert_path: Self::get_str_env("TLS_CERT_PATH", "certificates/cert.pem".to_owned()),
                key_path: Self::get_str_env("TLS_KEY_PATH", "certificates/key.pem".to_owned()),
            },
        }
    }

    fn get_port_env(var: &str, default: u16) -> u16 {
        env::var(var)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn get_str_env(var: &str, default: String) -> String {
        env::var(var).unwrap_or(default)
    }

    fn get_dur_env(var: &str, default: i64) -> i64 {
        env::var(var)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
