use crate::lulu_api::jwt::{decode_token, TokenClaims};
use crate::lulu_api::types::LuluError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Scope claim of a token response, either space separated or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scope {
    Single(String),
    Many(Vec<String>),
}

/// Response from the Lulu token endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    pub access_token: String,
    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: i64,
    /// Refresh token lifetime in seconds
    #[serde(default)]
    pub refresh_expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, rename = "not-before-policy")]
    pub not_before_policy: Option<i64>,
    #[serde(default)]
    pub session_state: Option<String>,
    #[serde(default)]
    pub scope: Option<Scope>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Immutable snapshot of the currently held access token
///
/// A new snapshot is created for every successful token request and
/// replaces the previous one as a whole.
#[derive(Debug, Clone)]
pub struct TokenState {
    response: AuthenticationResponse,
    claims: TokenClaims,
    obtained_at: DateTime<Utc>,
}

impl TokenState {
    /// Decode the access token in `response` and build a snapshot
    pub fn new(response: AuthenticationResponse) -> Result<Self, LuluError> {
        Self::obtained_at(response, Utc::now())
    }

    pub(crate) fn obtained_at(
        response: AuthenticationResponse,
        obtained_at: DateTime<Utc>,
    ) -> Result<Self, LuluError> {
        let claims = decode_token(&response.access_token)?;
        Ok(Self {
            response,
            claims,
            obtained_at,
        })
    }

    pub fn access_token(&self) -> &str {
        &self.response.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.response.refresh_token.as_deref()
    }

    pub fn response(&self) -> &AuthenticationResponse {
        &self.response
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    /// Expiry taken from the token's `exp` claim
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }

    /// When the refresh token stops being accepted, if the server said
    ///
    /// Keycloak reports `refresh_expires_in: 0` for offline tokens that do
    /// not expire, which maps to `None`.
    pub fn refresh_expires_at(&self) -> Option<DateTime<Utc>> {
        match self.response.refresh_expires_in {
            Some(seconds) if seconds > 0 => Duration::try_seconds(seconds)
                .and_then(|lifetime| self.obtained_at.checked_add_signed(lifetime)),
            _ => None,
        }
    }

    /// Whether the token can be reused as-is at `now`: `now < exp - margin`
    ///
    /// Inside the margin, past expiry, or with an out-of-range `exp` the
    /// token is stale and must be renewed before use.
    pub fn is_fresh(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        match self.expires_at().checked_sub_signed(margin) {
            Some(renew_at) => now < renew_at,
            None => false,
        }
    }

    /// Check if the access token has expired
    pub fn is_expired(&self) -> bool {
        self.claims.is_expired()
    }

    /// Whether the stored refresh token can still be exchanged at `now`
    pub fn can_refresh(&self, now: DateTime<Utc>) -> bool {
        if self.refresh_token().map_or(true, |t| t.is_empty()) {
            return false;
        }
        match self.refresh_expires_at() {
            Some(expiry) => now < expiry,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lulu_api::jwt::test_support::token_expiring_at;
    use serde_json::json;

    fn response(exp: i64, refresh_expires_in: Option<i64>) -> AuthenticationResponse {
        AuthenticationResponse {
            access_token: token_expiring_at(exp),
            expires_in: 3600,
            refresh_expires_in,
            refresh_token: Some("refresh-abc".to_string()),
            token_type: "bearer".to_string(),
            not_before_policy: None,
            session_state: None,
            scope: None,
        }
    }

    #[test]
    fn test_authentication_response_deserialization() {
        let value = json!({
            "access_token": "abc",
            "expires_in": 3600,
            "refresh_expires_in": 7200,
            "refresh_token": "def",
            "token_type": "bearer",
            "not-before-policy": 0,
            "session_state": "c0ffee",
            "scope": "profile email"
        });

        let parsed: AuthenticationResponse = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.refresh_token.as_deref(), Some("def"));
        assert_eq!(parsed.not_before_policy, Some(0));
        assert_eq!(parsed.scope, Some(Scope::Single("profile email".to_string())));
    }

    #[test]
    fn test_authentication_response_minimal() {
        let parsed: AuthenticationResponse =
            serde_json::from_value(json!({ "access_token": "abc", "scope": ["a", "b"] }))
                .unwrap();
        assert_eq!(parsed.token_type, "bearer");
        assert!(parsed.refresh_token.is_none());
        assert_eq!(
            parsed.scope,
            Some(Scope::Many(vec!["a".to_string(), "b".to_string()]))
        );

        let missing = serde_json::from_value::<AuthenticationResponse>(json!({ "expires_in": 1 }));
        assert!(missing.is_err());
    }

    #[test]
    fn test_freshness_boundary() {
        let now = Utc::now();
        let exp = now.timestamp() + 20 * 60;
        let state = TokenState::obtained_at(response(exp, None), now).unwrap();
        let margin = Duration::minutes(15);

        assert!(state.is_fresh(now, margin));
        // exactly at exp - margin the token is stale
        let boundary = DateTime::from_timestamp(exp, 0).unwrap() - margin;
        assert!(!state.is_fresh(boundary, margin));
        assert!(state.is_fresh(boundary - Duration::seconds(1), margin));
    }

    #[test]
    fn test_freshness_inside_margin() {
        let now = Utc::now();
        let state =
            TokenState::obtained_at(response(now.timestamp() + 5 * 60, None), now).unwrap();

        assert!(!state.is_fresh(now, Duration::minutes(15)));
        assert!(state.is_fresh(now, Duration::minutes(1)));
        assert!(!state.is_expired());
    }

    #[test]
    fn test_can_refresh() {
        let now = Utc::now();
        let exp = now.timestamp() + 60;

        let state = TokenState::obtained_at(response(exp, Some(1800)), now).unwrap();
        assert!(state.can_refresh(now));
        assert!(!state.can_refresh(now + Duration::seconds(1800)));

        let offline = TokenState::obtained_at(response(exp, Some(0)), now).unwrap();
        assert!(offline.refresh_expires_at().is_none());
        assert!(offline.can_refresh(now + Duration::days(365)));

        let mut no_refresh = response(exp, None);
        no_refresh.refresh_token = None;
        let state = TokenState::obtained_at(no_refresh, now).unwrap();
        assert!(!state.can_refresh(now));
    }

    #[test]
    fn test_out_of_range_expiry_is_stale() {
        let now = Utc::now();
        let state = TokenState::obtained_at(response(i64::MIN, Some(i64::MAX)), now).unwrap();
        assert!(!state.is_fresh(now, Duration::minutes(15)));
        assert!(state.refresh_expires_at().is_none());
    }

    #[test]
    fn test_new_rejects_malformed_access_token() {
        let mut bad = response(0, None);
        bad.access_token = "opaque".to_string();
        assert!(matches!(TokenState::new(bad), Err(LuluError::Decode(_))));
    }
}
