//! Database connection settings loaded from the environment.

use crate::task::adapters::postgres::TaskPgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while reading settings or opening the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("invalid value '{value}' for {key}: {source}")]
    InvalidNumber {
        /// Environment variable name.
        key: &'static str,
        /// Raw value found.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The pool size must be at least one connection.
    #[error("DB_MAX_CONNECTIONS must be at least 1")]
    EmptyPool,

    /// The connection pool could not be built.
    #[error("failed to open database pool: {0}")]
    Pool(#[from] PoolError),
}

/// Connection settings for the task database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub database: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5432,
            user: "postgres".to_owned(),
            password: "password".to_owned(),
            database: "taskdb".to_owned(),
            max_connections: 10,
        }
    }
}

impl DatabaseSettings {
    /// Reads settings from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`,
    /// `DB_NAME`, and `DB_MAX_CONNECTIONS`. Unset or empty variables keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric variable is malformed or the
    /// pool size is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric variable is malformed or the
    /// pool size is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = Self::default();

        let port = match read("DB_PORT") {
            Some(raw) => parse_number("DB_PORT", raw)?,
            None => defaults.port,
        };
        let max_connections = match read("DB_MAX_CONNECTIONS") {
            Some(raw) => parse_number("DB_MAX_CONNECTIONS", raw)?,
            None => defaults.max_connections,
        };
        if max_connections == 0 {
            return Err(ConfigError::EmptyPool);
        }

        Ok(Self {
            host: read("DB_HOST").unwrap_or(defaults.host),
            port,
            user: read("DB_USER").unwrap_or(defaults.user),
            password: read("DB_PASSWORD").unwrap_or(defaults.password),
            database: read("DB_NAME").unwrap_or(defaults.database),
            max_connections,
        })
    }

    /// Renders a libpq keyword/value connection string.
    ///
    /// Text values are single-quoted with backslashes and quotes escaped,
    /// so credentials may contain URL delimiters such as `@` or `/`.
    #[must_use]
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode=disable",
            quote_conninfo(&self.host),
            self.port,
            quote_conninfo(&self.user),
            quote_conninfo(&self.password),
            quote_conninfo(&self.database),
        )
    }

    /// Opens a connection pool, checking that a first connection succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the database is unreachable.
    pub fn connect(&self) -> Result<TaskPgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.connection_string());
        let pool = Pool::builder()
            .max_size(self.max_connections)
            .build(manager)?;
        Ok(pool)
    }
}

fn quote_conninfo(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if matches!(ch, '\'' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

fn parse_number<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    value
        .parse()
        .map_err(|source| ConfigError::InvalidNumber { key, value, source })
}
