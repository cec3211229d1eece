//! API configuration

use serde::Deserialize;

/// Placeholder signing secret; anyone who knows it can mint admin tokens
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
    /// Administrator provisioned at startup, together with `admin_key`
    pub admin_email: Option<String>,
    pub admin_key: Option<String>,
    #[serde(skip)]
    pub database: DatabaseSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            max_connections: 10,
            admin_email: None,
            admin_key: None,
            database: DatabaseSettings::default(),
        }
    }
}

/// Where the database lives
///
/// `database_url` wins when set; otherwise the URL is assembled from the
/// individual `db_*` parts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            database_url: None,
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "postgres".to_string(),
            db_password: "postgres".to_string(),
            db_name: "lost_found".to_string(),
        }
    }
}

impl DatabaseSettings {
    pub fn url(&self) -> String {
        match &self.database_url {
            Some(url) if !url.trim().is_empty() => url.clone(),
            _ => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
            ),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables over defaults
    ///
    /// The unprefixed `PORT` and `DATABASE_URL` variables are honoured when
    /// their prefixed forms are absent.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_default("port", port)?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database_url", url)?;
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("API"))
            .build()?;

        let mut config: ApiConfig = settings.clone().try_deserialize()?;
        config.database = settings.try_deserialize()?;
        Ok(config)
    }

    /// The bootstrap administrator, when both halves are configured
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (self.admin_email.as_deref(), self.admin_key.as_deref()) {
            (Some(email), Some(key)) if !email.trim().is_empty() && !key.is_empty() => {
                Some((email, key))
            }
            _ => None,
        }
    }

    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_assembled_from_parts() {
        let settings = DatabaseSettings {
            db_host: "db".to_string(),
            db_name: "campus".to_string(),
            ..DatabaseSettings::default()
        };
        assert_eq!(settings.url(), "postgres://postgres:postgres@db:5432/campus");
    }

    #[test]
    fn test_explicit_database_url_wins() {
        let settings = DatabaseSettings {
            database_url: Some("postgres://elsewhere/lf".to_string()),
            ..DatabaseSettings::default()
        };
        assert_eq!(settings.url(), "postgres://elsewhere/lf");
    }

    #[test]
    fn test_blank_database_url_falls_back_to_parts() {
        let settings = DatabaseSettings {
            database_url: Some("  ".to_string()),
            ..DatabaseSettings::default()
        };
        assert!(settings.url().ends_with("@localhost:5432/lost_found"));
    }

    #[test]
    fn test_admin_credentials_need_both_halves() {
        let only_email = ApiConfig {
            admin_email: Some("admin@campus.edu".to_string()),
            ..ApiConfig::default()
        };
        assert_eq!(only_email.admin_credentials(), None);

        let both = ApiConfig {
            admin_key: Some("s3cret".to_string()),
            ..only_email
        };
        assert_eq!(both.admin_credentials(), Some(("admin@campus.edu", "s3cret")));
    }

    #[test]
    fn test_default_jwt_secret_is_flagged() {
        assert!(ApiConfig::default().uses_default_jwt_secret());

        let configured = ApiConfig {
            jwt_secret: "rotated".to_string(),
            ..ApiConfig::default()
        };
        assert!(!configured.uses_default_jwt_secret());
    }

    #[test]
    fn test_server_addr() {
        let config = ApiConfig {
            port: 3000,
            ..ApiConfig::default()
        };
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }
}
