use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 3;
const DEFAULT_REDIS_TIMEOUT_SECS: u64 = 3;
const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;
const DEFAULT_PORT: u16 = 8080;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST").context("DATABASE_HOST is not set")?,
            port: std::env::var("DATABASE_PORT")
                .context("DATABASE_PORT is not set")?
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: std::env::var("DATABASE_USERNAME").context("DATABASE_USERNAME is not set")?,
            password: std::env::var("DATABASE_PASSWORD").context("DATABASE_PASSWORD is not set")?,
            database: std::env::var("DATABASE_NAME").context("DATABASE_NAME is not set")?,
            query_timeout: Duration::from_secs(env_or(
                "DATABASE_QUERY_TIMEOUT_SECS",
                DEFAULT_QUERY_TIMEOUT_SECS,
            )?),
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST").context("REDIS_HOST is not set")?,
            port: std::env::var("REDIS_PORT")
                .context("REDIS_PORT is not set")?
                .parse()
                .context("REDIS_PORT must be a port number")?,
            timeout: Duration::from_secs(env_or(
                "REDIS_TIMEOUT_SECS",
                DEFAULT_REDIS_TIMEOUT_SECS,
            )?),
        };
        let auth = AuthConfig {
            ttl: env_or("AUTH_TOKEN_TTL", DEFAULT_TOKEN_TTL_SECS)?,
        };
        let server = ServerConfig {
            port: env_or("PORT", DEFAULT_PORT)?,
        };
        Ok(Self {
            database,
            redis,
            auth,
            server,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v.parse().with_context(|| format!("{key} has an invalid value")),
        Err(_) => Ok(default),
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    /// Upper bound for a single store call, including pool acquisition.
    pub query_timeout: Duration,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for connecting and for each command.
    pub timeout: Duration,
}

pub struct AuthConfig {
    /// Access token lifetime in seconds.
    pub ttl: u64,
}

pub struct ServerConfig {
    pub port: u16,
}
