use crate::lulu_api::types::LuluError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by a Lulu (Keycloak) access token
///
/// Only `exp` is required; the remaining registered claims are optional and
/// anything else the issuer adds is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
    /// Issuer - the realm URL
    #[serde(default)]
    pub iss: Option<String>,
    /// Subject - service account id
    #[serde(default)]
    pub sub: Option<String>,
    /// Authorized party - the client id the token was minted for
    #[serde(default)]
    pub azp: Option<String>,
    /// Space separated scopes
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TokenClaims {
    /// Expiry as a UTC timestamp
    ///
    /// Out-of-range values clamp to the earliest representable instant, so
    /// a nonsensical `exp` reads as already expired.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    /// Scopes as a list
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Decode an access token into its claims without verifying the signature
///
/// The token comes straight from the token endpoint over TLS, so only its
/// structure is checked.
///
/// # Example
///
/// ```no_run
/// use lulu_sdk::decode_token;
///
/// # fn example() -> Result<(), lulu_sdk::LuluError> {
/// let claims = decode_token("eyJhbGci...")?;
/// println!("Token expires at {}", claims.expires_at());
/// # Ok(())
/// # }
/// ```
pub fn decode_token(token: &str) -> Result<TokenClaims, LuluError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(LuluError::Decode("Token is empty".to_string()));
    }

    let data = jsonwebtoken::dangerous::insecure_decode::<TokenClaims>(token).map_err(|e| {
        tracing::error!("Failed to decode access token: {}", e);
        LuluError::Decode(format!("Malformed access token: {}", e))
    })?;

    tracing::debug!(
        "Access token decoded: alg={:?}, exp={}, sub={:?}",
        data.header.alg,
        data.claims.exp,
        data.claims.sub
    );

    Ok(data.claims)
}

#[cfg(test)]
pub(crate) mod test_support {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    /// Build an unsigned HS256-shaped token around the given payload
    pub fn token_with_claims(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signature = URL_SAFE_NO_PAD.encode(b"signature");
        format!("{}.{}.{}", header, payload, signature)
    }

    pub fn token_expiring_at(exp: i64) -> String {
        token_with_claims(&serde_json::json!({
            "exp": exp,
            "iat": exp.saturating_sub(3600),
            "iss": "https://api.sandbox.lulu.com/auth/realms/glasstree",
            "sub": "service-account-a",
            "azp": "a",
            "scope": "profile email"
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_decode_token_extracts_exp() {
        let token = token_expiring_at(1_900_000_000);
        let claims = decode_token(&token).unwrap();

        assert_eq!(claims.exp, 1_900_000_000);
        assert_eq!(claims.iat, Some(1_899_996_400));
        assert_eq!(claims.azp.as_deref(), Some("a"));
        assert_eq!(claims.scopes(), vec!["profile", "email"]);
    }

    #[test]
    fn test_decode_token_keeps_extra_claims() {
        let token = token_with_claims(&serde_json::json!({
            "exp": 1_900_000_000,
            "typ": "Bearer",
            "clientHost": "10.0.0.1"
        }));
        let claims = decode_token(&token).unwrap();

        assert_eq!(claims.extra["typ"], "Bearer");
        assert_eq!(claims.extra["clientHost"], "10.0.0.1");
        assert!(claims.sub.is_none());
    }

    #[test]
    fn test_decode_token_malformed() {
        assert!(matches!(decode_token(""), Err(LuluError::Decode(_))));
        assert!(matches!(
            decode_token("not-a-token"),
            Err(LuluError::Decode(_))
        ));
        assert!(matches!(
            decode_token("aaa.bbb.ccc"),
            Err(LuluError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_token_missing_exp() {
        let token = token_with_claims(&serde_json::json!({ "sub": "x" }));
        assert!(matches!(decode_token(&token), Err(LuluError::Decode(_))));
    }

    #[test]
    fn test_claims_is_expired() {
        let now = Utc::now().timestamp();

        let expired = decode_token(&token_expiring_at(now - 3600)).unwrap();
        assert!(expired.is_expired());

        let valid = decode_token(&token_expiring_at(now + 3600)).unwrap();
        assert!(!valid.is_expired());
        assert_eq!(valid.expires_at().timestamp(), now + 3600);
    }
}
