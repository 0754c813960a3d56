//! Shared fixtures for the integration tests

#![allow(dead_code)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use lulu_sdk::{Environment, LuluConfig, LuluService};
use serde_json::json;
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TOKEN_PATH: &str = "/auth/realms/glasstree/protocol/openid-connect/token";

/// Unsigned token whose payload carries `exp`
pub fn token_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "exp": exp,
            "iat": exp - 3600,
            "iss": "https://api.sandbox.lulu.com/auth/realms/glasstree",
            "sub": "service-account",
            "azp": "a"
        })
        .to_string(),
    );
    format!("{}.{}.{}", header, payload, URL_SAFE_NO_PAD.encode(b"sig"))
}

pub fn token_expiring_in_minutes(minutes: i64) -> String {
    token_with_exp(chrono::Utc::now().timestamp() + minutes * 60)
}

pub fn token_response(access_token: &str, refresh_token: Option<&str>) -> serde_json::Value {
    let mut body = json!({
        "access_token": access_token,
        "expires_in": 3600,
        "refresh_expires_in": 1800,
        "token_type": "bearer",
        "not-before-policy": 0,
        "scope": "profile email"
    });
    if let Some(refresh) = refresh_token {
        body["refresh_token"] = json!(refresh);
    }
    body
}

pub fn client_credentials_config(server: &MockServer) -> LuluConfig {
    LuluConfig::client_credentials("a", "b", Environment::Development).with_base_url(server.uri())
}

pub fn api_key_config(server: &MockServer) -> LuluConfig {
    LuluConfig::api_key("api-key-123", Environment::Development).with_base_url(server.uri())
}

/// Service with a token endpoint that always hands out a fresh token
pub async fn authenticated_service(server: &MockServer) -> (LuluService, String) {
    let access_token = token_expiring_in_minutes(60);
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_response(&access_token, Some("r1"))),
        )
        .mount(server)
        .await;

    let service = LuluService::new(client_credentials_config(server)).unwrap();
    (service, access_token)
}
