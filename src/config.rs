//! Client configuration
//!
//! A [`LuluConfig`] carries exactly one set of credentials plus the target
//! environment. It can be built directly, from a loosely-typed
//! [`ConfigOptions`] (e.g. deserialized from a settings file), or from
//! `LULU_*` environment variables.

use crate::lulu_api::types::LuluError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Production API base URL
pub const PRODUCTION_BASE_URL: &str = "https://api.lulu.com";

/// Sandbox API base URL
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.lulu.com";

/// Token endpoint path, relative to the base URL
pub const TOKEN_PATH: &str = "auth/realms/glasstree/protocol/openid-connect/token";

/// Default freshness margin in minutes
pub const DEFAULT_REFRESH_MARGIN_MINUTES: i64 = 15;

/// Largest accepted freshness margin (one day)
pub const MAX_REFRESH_MARGIN_MINUTES: i64 = 24 * 60;

/// Target Lulu environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Sandbox environment
    #[default]
    Development,
    /// Live environment
    Production,
}

impl Environment {
    /// Base URL for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Development => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = LuluError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "sandbox" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(LuluError::Configuration(format!(
                "Unknown environment '{}': expected 'development' or 'production'",
                other
            ))),
        }
    }
}

/// API credentials
///
/// Either a pre-shared API key sent as `Authorization: Basic <token>`, or a
/// client id/secret pair sent in the token request body. Only the client
/// credentials variant receives refresh tokens.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey { token: String },
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
}

impl Credentials {
    /// Whether a refresh grant can be used with these credentials
    pub fn supports_refresh(&self) -> bool {
        matches!(self, Credentials::ClientCredentials { .. })
    }
}

// Secrets never reach logs through Debug.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey { .. } => f
                .debug_struct("ApiKey")
                .field("token", &"<redacted>")
                .finish(),
            Credentials::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
        }
    }
}

/// Helpers for Lulu API keys
pub struct ApiKey;

impl ApiKey {
    /// Build the API key Lulu issues for a client key/secret pair
    /// (`base64(client_key:client_secret)`)
    pub fn encode(client_key: &str, client_secret: &str) -> String {
        BASE64.encode(format!("{}:{}", client_key, client_secret))
    }
}

/// Loosely-typed configuration shape
///
/// Credential variant is detected by which fields are present. Use
/// [`LuluConfig::from_options`] to validate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_margin_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Validated client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuluConfig {
    credentials: Credentials,
    environment: Environment,
    refresh_margin_minutes: i64,
    base_url: Option<String>,
}

impl LuluConfig {
    /// Configuration using a pre-shared API key
    pub fn api_key(token: impl Into<String>, environment: Environment) -> Self {
        Self::with_credentials(
            Credentials::ApiKey {
                token: token.into(),
            },
            environment,
        )
    }

    /// Configuration using a client id and secret
    pub fn client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self::with_credentials(
            Credentials::ClientCredentials {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
            },
            environment,
        )
    }

    fn with_credentials(credentials: Credentials, environment: Environment) -> Self {
        Self {
            credentials,
            environment,
            refresh_margin_minutes: DEFAULT_REFRESH_MARGIN_MINUTES,
            base_url: None,
        }
    }

    /// Set the freshness margin (builder pattern)
    pub fn with_refresh_margin_minutes(mut self, minutes: i64) -> Self {
        self.refresh_margin_minutes = minutes;
        self
    }

    /// Override the environment's base URL (builder pattern)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Validate a loosely-typed configuration
    ///
    /// Exactly one of `token` or the `client_key`/`client_secret` pair must be
    /// present.
    pub fn from_options(options: ConfigOptions) -> Result<Self, LuluError> {
        let ConfigOptions {
            token,
            client_key,
            client_secret,
            environment,
            refresh_margin_minutes,
            base_url,
        } = options;

        let credentials = match (token, client_key, client_secret) {
            (Some(token), None, None) => Credentials::ApiKey { token },
            (None, Some(client_id), Some(client_secret)) => Credentials::ClientCredentials {
                client_id,
                client_secret,
            },
            (None, None, None) => {
                return Err(LuluError::Configuration(
                    "No credentials provided: set either 'token' or 'client_key' and 'client_secret'"
                        .to_string(),
                ))
            }
            (Some(_), _, _) => {
                return Err(LuluError::Configuration(
                    "Both an API key and client credentials were provided; use only one".to_string(),
                ))
            }
            (None, Some(_), None) => {
                return Err(LuluError::Configuration(
                    "'client_key' provided without 'client_secret'".to_string(),
                ))
            }
            (None, None, Some(_)) => {
                return Err(LuluError::Configuration(
                    "'client_secret' provided without 'client_key'".to_string(),
                ))
            }
        };

        let config = Self {
            credentials,
            environment,
            refresh_margin_minutes: refresh_margin_minutes
                .unwrap_or(DEFAULT_REFRESH_MARGIN_MINUTES),
            base_url,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `LULU_*` environment variables
    ///
    /// Reads `LULU_API_KEY`, `LULU_CLIENT_KEY`, `LULU_CLIENT_SECRET`,
    /// `LULU_ENVIRONMENT`, `LULU_REFRESH_MARGIN_MINUTES` and `LULU_BASE_URL`.
    pub fn from_env() -> Result<Self, LuluError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, LuluError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = match non_empty("LULU_ENVIRONMENT") {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let refresh_margin_minutes = match non_empty("LULU_REFRESH_MARGIN_MINUTES") {
            Some(value) => Some(value.trim().parse::<i64>().map_err(|e| {
                LuluError::Configuration(format!(
                    "Invalid LULU_REFRESH_MARGIN_MINUTES '{}': {}",
                    value, e
                ))
            })?),
            None => None,
        };

        let options = ConfigOptions {
            token: non_empty("LULU_API_KEY"),
            client_key: non_empty("LULU_CLIENT_KEY"),
            client_secret: non_empty("LULU_CLIENT_SECRET"),
            environment,
            refresh_margin_minutes,
            base_url: non_empty("LULU_BASE_URL"),
        };

        tracing::debug!(
            "Loaded Lulu configuration from environment: environment={}",
            options.environment
        );

        Self::from_options(options)
    }

    /// Check field contents
    pub fn validate(&self) -> Result<(), LuluError> {
        match &self.credentials {
            Credentials::ApiKey { token } => {
                if token.trim().is_empty() {
                    return Err(LuluError::Configuration("API key is empty".to_string()));
                }
            }
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => {
                if client_id.trim().is_empty() {
                    return Err(LuluError::Configuration("client_key is empty".to_string()));
                }
                if client_secret.trim().is_empty() {
                    return Err(LuluError::Configuration(
                        "client_secret is empty".to_string(),
                    ));
                }
            }
        }

        if !(0..=MAX_REFRESH_MARGIN_MINUTES).contains(&self.refresh_margin_minutes) {
            return Err(LuluError::Configuration(format!(
                "Refresh margin must be between 0 and {} minutes (got {})",
                MAX_REFRESH_MARGIN_MINUTES, self.refresh_margin_minutes
            )));
        }

        Ok(())
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn refresh_margin_minutes(&self) -> i64 {
        self.refresh_margin_minutes
    }

    /// Effective base URL: the override if set, else the environment's URL
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}
