//! Application configuration sourced from the environment.
//!
//! Everything the core consumes from outside — backend base URL and the
//! identity provider coordinates — is supplied externally, never computed.
//! Defaults mirror the local development deployment.

use std::env;

/// Application-level constants
pub const APP_NAME: &str = "MedInsight";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "medinsight=info".to_string()
}

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_IDENTITY_URL: &str = "http://localhost:8180";
const DEFAULT_REALM: &str = "medinsight";
const DEFAULT_CLIENT_ID: &str = "medinsight-frontend";

/// Identity provider coordinates (Keycloak-style: endpoint, realm, client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub endpoint: String,
    pub realm: String,
    pub client_id: String,
}

/// Full application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend REST base URL (no trailing slash).
    pub api_base_url: String,
    pub identity: IdentityConfig,
}

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is set but empty")]
    EmptyValue(&'static str),
}

impl AppConfig {
    /// Local development defaults (backend on 8080, Keycloak on 8180).
    pub fn default_local() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            identity: IdentityConfig {
                endpoint: DEFAULT_IDENTITY_URL.to_string(),
                realm: DEFAULT_REALM.to_string(),
                client_id: DEFAULT_CLIENT_ID.to_string(),
            },
        }
    }

    /// Load configuration from the environment, falling back to the local
    /// defaults for any variable that is unset.
    ///
    /// Variables: `MEDINSIGHT_API_URL`, `MEDINSIGHT_IDENTITY_URL`,
    /// `MEDINSIGHT_REALM`, `MEDINSIGHT_CLIENT_ID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: read_url("MEDINSIGHT_API_URL", DEFAULT_API_URL)?,
            identity: IdentityConfig {
                endpoint: read_url("MEDINSIGHT_IDENTITY_URL", DEFAULT_IDENTITY_URL)?,
                realm: read_var("MEDINSIGHT_REALM", DEFAULT_REALM)?,
                client_id: read_var("MEDINSIGHT_CLIENT_ID", DEFAULT_CLIENT_ID)?,
            },
        })
    }
}

fn read_var(name: &'static str, default: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(name)),
        Ok(value) => Ok(value),
        Err(_) => Ok(default.to_string()),
    }
}

fn read_url(name: &'static str, default: &str) -> Result<String, ConfigError> {
    read_var(name, default).map(|url| url.trim_end_matches('/').to_string())
}
