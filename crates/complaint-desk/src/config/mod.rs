use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::complaints::NotificationDispatch;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub notifications: NotificationConfig,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort {
                variable: "APP_PORT",
            })?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let dispatch = match env::var("NOTIFY_MODE") {
            Ok(raw) => NotificationDispatch::parse(&raw)
                .ok_or(ConfigError::InvalidNotifyMode { value: raw })?,
            Err(_) => NotificationDispatch::Inline,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            notifications: NotificationConfig { dispatch },
            mail: MailConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// How complaint notifications are scheduled relative to the request.
#[derive(Debug, Clone, Copy)]
pub struct NotificationConfig {
    pub dispatch: NotificationDispatch,
}

/// SMTP relay settings. Only present when `SMTP_HOST` is set.
#[derive(Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub admin: String,
}

impl MailConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let host = match env::var("SMTP_HOST") {
            Ok(host) if !host.trim().is_empty() => host,
            _ => return Ok(None),
        };

        let port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort {
                variable: "SMTP_PORT",
            })?;

        let from = env::var("SMTP_FROM_EMAIL").map_err(|_| ConfigError::MissingVariable {
            variable: "SMTP_FROM_EMAIL",
        })?;
        let admin = env::var("ADMIN_EMAIL").map_err(|_| ConfigError::MissingVariable {
            variable: "ADMIN_EMAIL",
        })?;

        Ok(Some(Self {
            host,
            port,
            username: env::var("SMTP_USER").ok(),
            password: env::var("SMTP_PASSWORD").ok(),
            from,
            admin,
        }))
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("admin", &self.admin)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{variable} must be a valid u16")]
    InvalidPort { variable: &'static str },
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
    #[error("NOTIFY_MODE must be 'inline' or 'detached', got '{value}'")]
    InvalidNotifyMode { value: String },
    #[error("{variable} is required when SMTP_HOST is set")]
    MissingVariable { variable: &'static str },
}
