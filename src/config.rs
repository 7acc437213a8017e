use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_DYNAMO_TABLE: &str = "Employees";
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 120;
/// 1 MiB of photo plus headroom for the text fields.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = (1 << 20) + 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Which `EmployeeStore` implementation the process runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres { database_url: String },
    Dynamo { table: String },
}

/// Settings read once at startup and handed to every constructor by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub store: StoreBackend,
    pub photos_bucket: Option<String>,
    pub aws_region: Option<String>,
    pub connect_timeout: Duration,
    pub presign_expiry: Duration,
    pub max_request_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            store: StoreBackend::Memory,
            photos_bucket: None,
            aws_region: None,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            presign_expiry: Duration::from_secs(DEFAULT_PRESIGN_EXPIRY_SECS),
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store = if var("DYNAMO_MODE").as_deref() == Some("on") {
            StoreBackend::Dynamo {
                table: var("DYNAMO_TABLE").unwrap_or_else(|| DEFAULT_DYNAMO_TABLE.to_string()),
            }
        } else if let Some(database_url) = var("DATABASE_URL") {
            StoreBackend::Postgres { database_url }
        } else {
            match (
                var("DATABASE_HOST"),
                var("DATABASE_USER"),
                var("DATABASE_PASSWORD"),
                var("DATABASE_DB_NAME"),
            ) {
                (Some(host), Some(user), Some(password), Some(db_name)) => StoreBackend::Postgres {
                    database_url: format!("postgres://{}:{}@{}/{}", user, password, host, db_name),
                },
                _ => StoreBackend::Memory,
            }
        };

        let connect_timeout_ms = parse_number(
            "DATABASE_CONNECT_TIMEOUT_MS",
            var("DATABASE_CONNECT_TIMEOUT_MS"),
            DEFAULT_CONNECT_TIMEOUT_MS,
        )?;
        let presign_expiry_secs = parse_number(
            "PRESIGN_EXPIRY_SECS",
            var("PRESIGN_EXPIRY_SECS"),
            DEFAULT_PRESIGN_EXPIRY_SECS,
        )?;
        let max_request_bytes = parse_number(
            "MAX_REQUEST_BYTES",
            var("MAX_REQUEST_BYTES"),
            DEFAULT_MAX_REQUEST_BYTES as u64,
        )?;

        Ok(Config {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            store,
            photos_bucket: var("PHOTOS_BUCKET"),
            aws_region: var("AWS_REGION"),
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            presign_expiry: Duration::from_secs(presign_expiry_secs),
            max_request_bytes: max_request_bytes as usize,
        })
    }
}

fn parse_number(name: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidNumber { name, value }),
        },
    }
}
