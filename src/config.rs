use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_token: String,
    pub uploads_dir: String,
    pub mail_from: String,
    pub reset_token_ttl_minutes: i64,
    pub public_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            admin_token: get_env("ADMIN_TOKEN")?,
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".to_string()),
            mail_from: env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@localhost".to_string()),
            reset_token_ttl_minutes: get_env_parse_opt("RESET_TOKEN_TTL_MINUTES")?.unwrap_or(60),
            public_rps: get_env_parse_opt("PUBLIC_RPS")?.unwrap_or(50),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

/// Optional numeric variable: `Ok(None)` when unset, so the caller can apply
/// a default, but a present-and-malformed value is a startup error.
fn get_env_parse_opt<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_optional_var_yields_none() {
        env::remove_var("JOBBOARD_TTL_UNSET_CASE");
        let value: Option<i64> = get_env_parse_opt("JOBBOARD_TTL_UNSET_CASE").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn valid_optional_var_parses() {
        env::set_var("JOBBOARD_TTL_VALID_CASE", "90");
        let value: Option<i64> = get_env_parse_opt("JOBBOARD_TTL_VALID_CASE").unwrap();
        assert_eq!(value, Some(90));
    }

    #[test]
    fn malformed_optional_var_is_a_startup_error() {
        env::set_var("JOBBOARD_TTL_MALFORMED_CASE", "sixty");
        let result: Result<Option<i64>> = get_env_parse_opt("JOBBOARD_TTL_MALFORMED_CASE");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
