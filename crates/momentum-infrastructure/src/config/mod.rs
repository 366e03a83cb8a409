//! Runtime configuration read from `MOMENTUM_*` environment variables.

use momentum_domain::shared::DomainError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_BIND_ADDR: &str = "MOMENTUM_BIND_ADDR";
pub const ENV_DATABASE_PATH: &str = "MOMENTUM_DATABASE_PATH";
pub const ENV_LOG_DIR: &str = "MOMENTUM_LOG_DIR";
pub const ENV_JWT_SECRET: &str = "MOMENTUM_JWT_SECRET";
pub const ENV_TOKEN_TTL_HOURS: &str = "MOMENTUM_TOKEN_TTL_HOURS";
pub const ENV_COOKIE_NAME: &str = "MOMENTUM_COOKIE_NAME";
pub const ENV_COOKIE_SECURE: &str = "MOMENTUM_COOKIE_SECURE";
pub const ENV_DAILY_RESET_CRON: &str = "MOMENTUM_DAILY_RESET_CRON";
pub const ENV_DB_MAX_CONNECTIONS: &str = "MOMENTUM_DB_MAX_CONNECTIONS";

pub const MIN_JWT_SECRET_LEN: usize = 32;
const DEV_JWT_SECRET: &str = "momentum-dev-secret-change-me-before-deploying";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
    /// `None` disables the daily reset job.
    pub daily_reset_cron: Option<String>,
    pub db_max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = data_dir();
        let db_file = if cfg!(debug_assertions) {
            "momentum-dev.db"
        } else {
            "momentum.db"
        };

        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_path: data_dir.join(db_file),
            log_dir: data_dir.join("logs"),
            jwt_secret: if cfg!(debug_assertions) {
                DEV_JWT_SECRET.to_string()
            } else {
                String::new()
            },
            token_ttl_hours: 168,
            cookie_name: "momentum_token".to_string(),
            cookie_secure: false,
            daily_reset_cron: Some("0 0 0 * * *".to_string()),
            db_max_connections: 5,
        }
    }
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("momentum")
}

impl AppConfig {
    /// Read `.env` (if present) and then the process environment.
    pub fn load() -> Result<Self, DomainError> {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            config.bind_addr = addr.trim().parse().map_err(|_| {
                DomainError::Validation(format!("{} is not a socket address: {}", ENV_BIND_ADDR, addr))
            })?;
        }
        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(secret) = lookup(ENV_JWT_SECRET) {
            config.jwt_secret = secret;
        }
        if let Some(hours) = lookup(ENV_TOKEN_TTL_HOURS) {
            config.token_ttl_hours = parse_number(ENV_TOKEN_TTL_HOURS, &hours)?;
        }
        if let Some(name) = lookup(ENV_COOKIE_NAME) {
            config.cookie_name = name.trim().to_string();
        }
        if let Some(secure) = lookup(ENV_COOKIE_SECURE) {
            config.cookie_secure = parse_bool(ENV_COOKIE_SECURE, &secure)?;
        }
        if let Some(cron) = lookup(ENV_DAILY_RESET_CRON) {
            let cron = cron.trim();
            config.daily_reset_cron = (!cron.is_empty()).then(|| cron.to_string());
        }
        if let Some(max) = lookup(ENV_DB_MAX_CONNECTIONS) {
            config.db_max_connections = parse_number(ENV_DB_MAX_CONNECTIONS, &max)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(DomainError::Validation(format!(
                "{} must be at least {} characters",
                ENV_JWT_SECRET, MIN_JWT_SECRET_LEN
            )));
        }
        if self.token_ttl_hours <= 0 {
            return Err(DomainError::Validation(format!(
                "{} must be positive",
                ENV_TOKEN_TTL_HOURS
            )));
        }
        if self.cookie_name.is_empty() {
            return Err(DomainError::Validation(format!(
                "{} cannot be empty",
                ENV_COOKIE_NAME
            )));
        }
        if self.db_max_connections == 0 {
            return Err(DomainError::Validation(format!(
                "{} must be at least 1",
                ENV_DB_MAX_CONNECTIONS
            )));
        }
        Ok(())
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    pub fn with_token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = hours;
        self
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    pub fn with_daily_reset_cron(mut self, cron: Option<String>) -> Self {
        self.daily_reset_cron = cron;
        self
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::Validation(format!("{} is not a valid number: {}", key, raw)))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, DomainError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::Validation(format!(
            "{} is not a valid boolean: {}",
            key, raw
        ))),
    }
}
