use std::env;
use std::net::IpAddr;

use taskboard_core::AppError;

/// Runtime configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: IpAddr,
    pub api_port: u16,
    pub stripe_secret_key: String,
    pub identity_api_url: String,
    pub identity_api_key: String,
}

impl ApiConfig {
    /// Loads configuration, failing fast on missing required values.
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let stripe_secret_key = required_env("STRIPE_SECRET_KEY")?;
        let identity_api_url = required_env("IDENTITY_API_URL")?;
        let identity_api_key = required_env("IDENTITY_API_KEY")?;

        let api_host = env::var("API_HOST")
            .unwrap_or_else(|_| "127.0.0.1".to_owned())
            .parse::<IpAddr>()
            .map_err(|error| AppError::Validation(format!("invalid API_HOST: {error}")))?;
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            stripe_secret_key,
            identity_api_url,
            identity_api_key,
        })
    }
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} must be set")))
}
