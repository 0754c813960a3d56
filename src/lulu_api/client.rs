use crate::config::{Credentials, LuluConfig, TOKEN_PATH};
use crate::lulu_api::request::{default_headers, Headers, RequestDescriptor, AUTHORIZATION};
use crate::lulu_api::token::{AuthenticationResponse, TokenState};
use crate::lulu_api::transport::{HttpRequest, HttpTransport, ReqwestTransport, RequestBody};
use crate::lulu_api::types::{ApiError, LuluError};
use chrono::{Duration, Utc};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::{Arc, RwLock};
use url::Url;

/// Authenticated HTTP client for the Lulu Print API
///
/// Owns the credentials and the current access token. Authentication is
/// deferred until the first request; afterwards the cached token is reused
/// until it enters the refresh margin, at which point it is refreshed (client
/// credentials) or re-minted (API key).
///
/// The client is `Send + Sync` and is normally shared behind an `Arc`.
pub struct LuluClient {
    config: LuluConfig,
    base_url: Url,
    token_url: Url,
    transport: Arc<dyn HttpTransport>,
    default_headers: Headers,
    /// Current token snapshot; `Some` means authenticated
    state: RwLock<Option<Arc<TokenState>>>,
    /// Serializes token requests so concurrent callers share one
    auth_lock: tokio::sync::Mutex<()>,
}

impl fmt::Debug for LuluClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LuluClient")
            .field("environment", &self.config.environment())
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl LuluClient {
    /// Create a new Lulu API client using the default `reqwest` transport
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lulu_sdk::{Environment, LuluClient, LuluConfig};
    ///
    /// # fn example() -> Result<(), lulu_sdk::LuluError> {
    /// let config = LuluConfig::client_credentials("client-key", "client-secret", Environment::Development);
    /// let client = LuluClient::new(config)?;
    /// assert!(!client.is_authenticated());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: LuluConfig) -> Result<Self, LuluError> {
        let transport = ReqwestTransport::new().map_err(LuluError::Transport)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client with a custom transport
    pub fn with_transport(
        config: LuluConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, LuluError> {
        config.validate()?;

        let base_url = parse_base_url(config.base_url())?;
        let token_url = base_url.join(TOKEN_PATH)?;

        tracing::debug!(
            "Creating LuluClient: environment={}, base_url={}, credentials={}",
            config.environment(),
            base_url,
            match config.credentials() {
                Credentials::ApiKey { .. } => "api_key",
                Credentials::ClientCredentials { .. } => "client_credentials",
            }
        );

        Ok(Self {
            config,
            base_url,
            token_url,
            transport,
            default_headers: default_headers(),
            state: RwLock::new(None),
            auth_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn config(&self) -> &LuluConfig {
        &self.config
    }

    /// Get the base URL for this client
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Get the token endpoint URL
    pub fn token_url(&self) -> &str {
        self.token_url.as_str()
    }

    /// Whether a token is currently held
    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    /// The current token snapshot, if authenticated
    pub fn current_token(&self) -> Option<Arc<TokenState>> {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn store(&self, next: Option<Arc<TokenState>>) {
        match self.state.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Drop the cached token so the next request authenticates from scratch
    pub fn invalidate(&self) {
        if self.current_token().is_some() {
            tracing::debug!("Clearing cached Lulu access token");
        }
        self.store(None);
    }

    /// Clear the cached token only if it is still `token`
    ///
    /// A request that failed with an older token leaves a newer one cached.
    fn discard(&self, token: &Arc<TokenState>) {
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, token))
        {
            tracing::debug!("Clearing cached Lulu access token after a failed request");
            *guard = None;
        }
    }

    fn refresh_margin(&self) -> Duration {
        Duration::minutes(self.config.refresh_margin_minutes())
    }

    /// Return a token that is valid for at least the refresh margin
    ///
    /// Mints on first use, reuses a fresh token, and renews a stale one
    /// (refresh grant first where available, falling back to a new mint).
    /// Any failure clears the cached token.
    pub async fn ensure_valid_token(&self) -> Result<Arc<TokenState>, LuluError> {
        let margin = self.refresh_margin();

        if let Some(current) = self.current_token() {
            if current.is_fresh(Utc::now(), margin) {
                tracing::trace!("Reusing cached access token");
                return Ok(current);
            }
        }

        let _guard = self.auth_lock.lock().await;

        // Another caller may have renewed the token while we waited
        let current = self.current_token();
        let now = Utc::now();
        match current {
            Some(current) if current.is_fresh(now, margin) => {
                tracing::debug!("Access token renewed by a concurrent request");
                Ok(current)
            }
            Some(current) => {
                tracing::info!(
                    "Access token expires at {}, within the {} minute refresh margin",
                    current.expires_at(),
                    self.config.refresh_margin_minutes()
                );
                self.renew(&current).await
            }
            None => self.mint_token().await,
        }
    }

    async fn renew(&self, current: &TokenState) -> Result<Arc<TokenState>, LuluError> {
        if self.config.credentials().supports_refresh() && current.can_refresh(Utc::now()) {
            match self.refresh_token(current).await {
                Ok(state) => return Ok(state),
                Err(e) => {
                    tracing::warn!("Token refresh failed, requesting a new token: {}", e);
                }
            }
        } else {
            tracing::debug!("No usable refresh token, requesting a new token");
        }
        self.mint_token().await
    }

    /// Request a new token with the configured credentials
    ///
    /// API keys are sent as `Authorization: Basic <token>`; client
    /// credentials go in the form body.
    pub async fn mint_token(&self) -> Result<Arc<TokenState>, LuluError> {
        let mut headers = token_request_headers();
        let mut form = vec![("grant_type".to_string(), "client_credentials".to_string())];

        match self.config.credentials() {
            Credentials::ApiKey { token } => {
                headers.insert(AUTHORIZATION, format!("Basic {}", token));
            }
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => {
                form.push(("client_id".to_string(), client_id.clone()));
                form.push(("client_secret".to_string(), client_secret.clone()));
            }
        }

        tracing::info!("Requesting Lulu access token from: {}", self.token_url);
        let state = self.token_request(headers, form).await?;
        tracing::info!(
            "Authentication successful: token_type={}, expires_at={}",
            state.response().token_type,
            state.expires_at()
        );
        Ok(state)
    }

    /// Exchange the refresh token held in `current` for a new access token
    ///
    /// Only available with client credentials; API keys never receive a
    /// refresh token.
    pub async fn refresh_token(&self, current: &TokenState) -> Result<Arc<TokenState>, LuluError> {
        let (client_id, client_secret) = match self.config.credentials() {
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => (client_id, client_secret),
            Credentials::ApiKey { .. } => {
                return Err(LuluError::Authentication(ApiError::Request(
                    "Token refresh is not available with API key credentials".to_string(),
                )))
            }
        };

        let refresh_token = current.refresh_token().filter(|t| !t.is_empty()).ok_or_else(|| {
            LuluError::Authentication(ApiError::Request(
                "No refresh token available".to_string(),
            ))
        })?;

        let form = vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("client_id".to_string(), client_id.clone()),
            ("client_secret".to_string(), client_secret.clone()),
            ("refresh_token".to_string(), refresh_token.to_string()),
        ];

        tracing::info!("Refreshing Lulu access token at: {}", self.token_url);
        let state = self.token_request(token_request_headers(), form).await?;
        tracing::info!(
            "Token refresh successful: expires_at={}",
            state.expires_at()
        );
        Ok(state)
    }

    async fn token_request(
        &self,
        headers: Headers,
        form: Vec<(String, String)>,
    ) -> Result<Arc<TokenState>, LuluError> {
        let request = HttpRequest {
            method: Method::POST,
            url: self.token_url.to_string(),
            headers,
            query: Vec::new(),
            body: RequestBody::Form(form),
        };

        let result = self.transport.execute(request).await.and_then(|body| {
            serde_json::from_value::<AuthenticationResponse>(body).map_err(|e| {
                ApiError::Parse(format!("Invalid token response: {}", e))
            })
        });

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Token request failed: {}", e);
                self.invalidate();
                return Err(LuluError::Authentication(e));
            }
        };

        tracing::debug!(
            "Access token length: {}, expires_in={}s",
            response.access_token.len(),
            response.expires_in
        );

        let state = match TokenState::new(response) {
            Ok(state) => Arc::new(state),
            Err(e) => {
                self.invalidate();
                return Err(e);
            }
        };

        self.store(Some(state.clone()));
        Ok(state)
    }

    /// Merge default headers with the descriptor's and attach the bearer token
    ///
    /// Caller headers win over defaults, and a caller-supplied
    /// `Authorization` header is never replaced. Returns a new descriptor.
    pub fn authorize(&self, descriptor: &RequestDescriptor, token: &TokenState) -> RequestDescriptor {
        let mut authorized = descriptor.clone();
        authorized.headers = self.default_headers.merged_with(&descriptor.headers);
        if !authorized.headers.contains(AUTHORIZATION) {
            authorized
                .headers
                .insert(AUTHORIZATION, format!("Bearer {}", token.access_token()));
        }
        authorized
    }

    /// Authenticate if needed and perform a resource request
    ///
    /// Returns the parsed JSON body. A failed request clears the token it
    /// was sent with, so the next call re-authenticates; nothing is retried.
    pub async fn send(&self, descriptor: RequestDescriptor) -> Result<serde_json::Value, LuluError> {
        let token = self.ensure_valid_token().await?;
        let authorized = self.authorize(&descriptor, &token);
        let url = self.resource_url(&authorized.path)?;

        tracing::debug!("{} {}", authorized.method, url);

        let request = HttpRequest {
            method: authorized.method,
            url: url.to_string(),
            headers: authorized.headers,
            query: authorized.query,
            body: authorized
                .body
                .map(RequestBody::Json)
                .unwrap_or(RequestBody::Empty),
        };

        self.transport.execute(request).await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            self.discard(&token);
            LuluError::Transport(e)
        })
    }

    /// Like [`send`](Self::send), deserializing the body into `T`
    pub async fn send_as<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, LuluError> {
        let path = descriptor.path.clone();
        let body = self.send(descriptor).await?;
        serde_json::from_value(body).map_err(|e| {
            tracing::error!("Failed to parse response from {}: {}", path, e);
            LuluError::Transport(ApiError::Parse(format!("Failed to parse response: {}", e)))
        })
    }

    fn resource_url(&self, path: &str) -> Result<Url, LuluError> {
        self.base_url.join(path.trim_start_matches('/')).map_err(|e| {
            LuluError::Configuration(format!("Invalid request path '{}': {}", path, e))
        })
    }
}

fn token_request_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type", "application/x-www-form-urlencoded");
    headers
}

/// Parse a base URL, ensuring it ends with `/` so relative joins keep any
/// path prefix
fn parse_base_url(raw: &str) -> Result<Url, LuluError> {
    let mut base = raw.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let url = Url::parse(&base)?;
    if url.cannot_be_a_base() {
        return Err(LuluError::Configuration(format!(
            "Base URL '{}' cannot be used as a base",
            raw
        )));
    }
    Ok(url)
}
