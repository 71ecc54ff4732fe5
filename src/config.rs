//! Process configuration read from the environment.

use derive_more::Display;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Display, PartialEq)]
pub enum ConfigError {
    #[display(fmt = "{} is not set", _0)]
    Missing(&'static str),
    #[display(fmt = "{} has an invalid value: {:?}", _0, _1)]
    Invalid(&'static str, String),
}

#[derive(Debug, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub backend: Backend,
}

#[derive(Debug, PartialEq)]
pub enum Backend {
    Memory,
    Postgres(DatabaseSettings),
}

#[derive(Debug, PartialEq)]
pub struct DatabaseSettings {
    pub url: String,
    pub pool_size: u32,
    pub connect_timeout: Duration,
}

/// Connection credentials for the users database.
#[derive(Debug, PartialEq)]
pub struct DbCredentials {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbCredentials {
    /// Connection URL with the user, password and database name
    /// percent-encoded.
    pub fn url(&self) -> String {
        let user = utf8_percent_encode(&self.user, NON_ALPHANUMERIC);
        let database = utf8_percent_encode(&self.database, NON_ALPHANUMERIC);

        if self.password.is_empty() {
            format!(
                "postgres://{}@{}:{}/{}",
                user, self.host, self.port, database
            )
        } else {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                user,
                utf8_percent_encode(&self.password, NON_ALPHANUMERIC),
                self.host,
                self.port,
                database
            )
        }
    }

    fn from_lookup<F>(lookup: &F) -> Result<DbCredentials, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(DbCredentials {
            host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(lookup, "DB_PORT", 5432)?,
            user: lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            database: lookup("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?,
        })
    }
}

impl Settings {
    pub fn from_env() -> Result<Settings, ConfigError> {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 8080)?;

        let backend = match lookup("USER_STORE").as_deref() {
            None | Some("memory") => Backend::Memory,
            Some("postgres") => Backend::Postgres(DatabaseSettings::from_lookup(&lookup)?),
            Some(other) => return Err(ConfigError::Invalid("USER_STORE", other.to_string())),
        };

        Ok(Settings {
            host,
            port,
            backend,
        })
    }
}

impl DatabaseSettings {
    fn from_lookup<F>(lookup: &F) -> Result<DatabaseSettings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => DbCredentials::from_lookup(lookup)?.url(),
        };

        let pool_size = parse_or(lookup, "DB_POOL_SIZE", 10)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid("DB_POOL_SIZE", "0".to_string()));
        }

        Ok(DatabaseSettings {
            url,
            pool_size,
            connect_timeout: Duration::from_secs(parse_or(lookup, "DB_CONNECT_TIMEOUT_SECS", 5)?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(default),
    }
}
