//! Configuration management

use std::time::Duration;

use config::{
    builder::{ConfigBuilder, DefaultState},
    Config, ConfigError, Environment, File,
};
use serde::Deserialize;

use crate::constants::{DEFAULT_EMAIL_TIMEOUT_SECS, DEFAULT_PERSISTENCE_TIMEOUT_SECS};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub mail: MailSettings,
    pub registration: RegistrationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Origin of the marketing site allowed to call the API.
    pub cors_origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// Plain connections are only meant for local relays.
    pub starttls: bool,
    pub from_address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistrationSettings {
    /// Scheme of the verification link, `http` or `https`.
    pub verification_scheme: String,
    /// Base domain under which tenant subdomains live.
    pub verification_domain: String,
    pub persistence_timeout_secs: u64,
    pub email_timeout_secs: u64,
}

impl RegistrationSettings {
    pub fn persistence_timeout(&self) -> Duration {
        Duration::from_secs(self.persistence_timeout_secs)
    }

    pub fn email_timeout(&self) -> Duration {
        Duration::from_secs(self.email_timeout_secs)
    }
}

impl AppConfig {
    /// Loads defaults, then `config/default`, `config/{APP_ENV}` and finally
    /// `MODL__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("MODL")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "modl-server")?
            .set_default("database.url", "postgres://localhost/modl")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("database.run_migrations", true)?
            .set_default("mail.smtp_host", "localhost")?
            .set_default("mail.smtp_port", 1025)?
            .set_default("mail.starttls", false)?
            .set_default("mail.from_address", "modl <noreply@modl.gg>")?
            .set_default("registration.verification_scheme", "http")?
            .set_default("registration.verification_domain", "modl.gg")?
            .set_default(
                "registration.persistence_timeout_secs",
                DEFAULT_PERSISTENCE_TIMEOUT_SECS,
            )?
            .set_default("registration.email_timeout_secs", DEFAULT_EMAIL_TIMEOUT_SECS)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), AppError> {
        let scheme = self.registration.verification_scheme.as_str();
        if scheme != "http" && scheme != "https" {
            return Err(AppError::InvalidSetting {
                key: "registration.verification_scheme",
                reason: format!("expected http or https, got {:?}", scheme),
            });
        }
        if self.registration.verification_domain.trim().is_empty() {
            return Err(AppError::InvalidSetting {
                key: "registration.verification_domain",
                reason: "must not be empty".into(),
            });
        }
        if self.registration.persistence_timeout_secs == 0 || self.registration.email_timeout_secs == 0 {
            return Err(AppError::InvalidSetting {
                key: "registration",
                reason: "timeouts must be at least one second".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize() {
        let config = AppConfig::from_builder(AppConfig::defaults().unwrap()).unwrap();
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.registration.verification_scheme, "http");
        assert_eq!(config.registration.persistence_timeout(), Duration::from_secs(5));
        assert_eq!(config.registration.email_timeout(), Duration::from_secs(10));
        assert!(config.mail.smtp_username.is_none());
        assert!(config.app.cors_origin.is_none());
    }

    #[test]
    fn overrides_take_precedence() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("registration.verification_domain", "example.test")
            .unwrap()
            .set_override("mail.smtp_username", "relay-user")
            .unwrap();
        let config = AppConfig::from_builder(builder).unwrap();
        assert_eq!(config.registration.verification_domain, "example.test");
        assert_eq!(config.mail.smtp_username.as_deref(), Some("relay-user"));
    }

    #[test]
    fn rejects_unknown_link_scheme() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("registration.verification_scheme", "ftp")
            .unwrap();
        let err = AppConfig::from_builder(builder).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidSetting { key: "registration.verification_scheme", .. }
        ));
    }

    #[test]
    fn rejects_zero_timeouts() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("registration.email_timeout_secs", 0)
            .unwrap();
        assert!(AppConfig::from_builder(builder).is_err());
    }
}
