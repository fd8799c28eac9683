use std::{env, fmt::Display, str::FromStr, time::Duration};

use dotenv::dotenv;

/// Runtime configuration, read from the environment (and `.env`).
///
/// | variable | default |
/// |---|---|
/// | `DATABASE_URL` | required |
/// | `HOST` | `127.0.0.1` |
/// | `PORT` | `8080` |
/// | `DATABASE_POOL_SIZE` | `10` |
/// | `DATABASE_CONNECTION_TIMEOUT` | `30` (seconds) |
/// | `RUN_MIGRATIONS` | `true` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
    pub connection_timeout: Duration,
    pub run_migrations: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SettingsError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Missing(key) => write!(f, "Environment variable '{}' not set", key),
            SettingsError::Invalid { key, value } => {
                write!(f, "Environment variable '{}' has invalid value '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl Settings {
    pub fn from_env() -> Result<Settings, SettingsError> {
        dotenv().ok();
        Settings::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Settings, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(SettingsError::Missing("DATABASE_URL"))?;
        let connection_timeout: u64 = parse_or(&lookup, "DATABASE_CONNECTION_TIMEOUT", 30)?;

        Ok(Settings {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| String::from("127.0.0.1")),
            port: parse_or(&lookup, "PORT", 8080)?,
            pool_size: parse_or(&lookup, "DATABASE_POOL_SIZE", 10)?,
            connection_timeout: Duration::from_secs(connection_timeout),
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
        })
    }

    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, SettingsError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(SettingsError::Invalid { key, value }),
        },
    }
}
