//! Slack "Sign in with Slack" (OpenID Connect) client.
//!
//! Covers the three steps of the login flow: building the authorize URL the
//! user is sent to, exchanging the returned `code` for tokens, and reading the
//! signed-in user's identity.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const API_BASE_URL: &str = "https://slack.com/api";
const AUTHORIZE_URL: &str = "https://slack.com/openid/connect/authorize";
const USER_ID_CLAIM: &str = "https://slack.com/user_id";

pub type Result<T> = std::result::Result<T, SlackError>;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Slack answered with `"ok": false` (or no `ok` at all).
    #[error("Slack rejected {endpoint}: {reason}")]
    Rejected {
        endpoint: &'static str,
        reason: String,
    },

    #[error("Slack response from {endpoint} is missing `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },
}

#[derive(Clone)]
pub struct SlackCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl std::fmt::Debug for SlackCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Tokens returned by `openid.connect.token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackTokenInfo {
    pub token_type: String,
    /// The OpenID `id_token`.
    pub jwt: String,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackUserInfo {
    pub user_id: String,
    pub slack_token: SlackTokenInfo,
}

/// Build the "Sign in with Slack" URL for the given app.
pub fn authorize_url(client_id: &str, redirect_uri: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("scope", "openid email profile")
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("client_id", client_id)
        .finish();
    format!("{AUTHORIZE_URL}?{query}")
}

#[derive(Debug, Clone)]
pub struct SlackOidcClient {
    client: reqwest::Client,
    credentials: SlackCredentials,
    base_url: String,
}

impl SlackOidcClient {
    pub fn new(credentials: SlackCredentials) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            credentials,
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn authorize_url(&self) -> String {
        authorize_url(&self.credentials.client_id, &self.credentials.redirect_uri)
    }

    /// Exchange an authorization `code` for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<SlackTokenInfo> {
        const ENDPOINT: &str = "openid.connect.token";

        let form = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ("code", code),
        ];

        let body: Value = self
            .client
            .post(format!("{}/{}", self.base_url, ENDPOINT))
            .form(&form[..])
            .send()
            .await?
            .json()
            .await?;

        ensure_ok(ENDPOINT, &body)?;
        tracing::debug!("Slack code exchanged for tokens");

        Ok(SlackTokenInfo {
            token_type: string_field(ENDPOINT, &body, "token_type")?,
            jwt: string_field(ENDPOINT, &body, "id_token")?,
            access_token: string_field(ENDPOINT, &body, "access_token")?,
        })
    }

    /// Read the identity of the user the tokens belong to.
    pub async fn user_info(&self, token: &SlackTokenInfo) -> Result<SlackUserInfo> {
        const ENDPOINT: &str = "openid.connect.userInfo";

        let body: Value = self
            .client
            .get(format!("{}/{}", self.base_url, ENDPOINT))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("{} {}", token.token_type, token.access_token),
            )
            .send()
            .await?
            .json()
            .await?;

        ensure_ok(ENDPOINT, &body)?;

        Ok(SlackUserInfo {
            user_id: string_field(ENDPOINT, &body, USER_ID_CLAIM)?,
            slack_token: token.clone(),
        })
    }
}

fn ensure_ok(endpoint: &'static str, body: &Value) -> Result<()> {
    if body.get("ok").and_then(Value::as_bool) == Some(true) {
        return Ok(());
    }
    let reason = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown_error")
        .to_string();
    Err(SlackError::Rejected { endpoint, reason })
}

fn string_field(endpoint: &'static str, body: &Value, field: &'static str) -> Result<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(SlackError::MissingField { endpoint, field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SlackOidcClient {
        SlackOidcClient::new(SlackCredentials {
            client_id: "123.456".into(),
            client_secret: "shh".into(),
            redirect_uri: "http://localhost/api/slackLogin".into(),
        })
        .with_base_url(server.uri())
    }

    #[test]
    fn test_authorize_url() {
        let url = authorize_url("123.456", "http://localhost/api/slackLogin");
        assert!(url.starts_with("https://slack.com/openid/connect/authorize?"));
        assert!(url.contains("scope=openid+email+profile"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%2Fapi%2FslackLogin"));
        assert!(url.contains("client_id=123.456"));
    }

    #[tokio::test]
    async fn test_code_exchange_and_user_info() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openid.connect.token"))
            .and(body_string_contains("code=abc"))
            .and(body_string_contains("client_secret=shh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "token_type": "Bearer",
                "access_token": "xoxp-1",
                "id_token": "eyJ.jwt"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/openid.connect.userInfo"))
            .and(header("authorization", "Bearer xoxp-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "https://slack.com/user_id": "U042"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = client.exchange_code("abc").await.unwrap();
        let info = client.user_info(&token).await.unwrap();
        assert_eq!(info.user_id, "U042");
        assert_eq!(info.slack_token.jwt, "eyJ.jwt");
        assert_eq!(info.slack_token.access_token, "xoxp-1");
    }

    #[tokio::test]
    async fn test_rejected_code() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openid.connect.token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": false, "error": "invalid_code"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).exchange_code("bad").await.unwrap_err();
        match err {
            SlackError::Rejected { endpoint, reason } => {
                assert_eq!(endpoint, "openid.connect.token");
                assert_eq!(reason, "invalid_code");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let credentials = SlackCredentials {
            client_id: "123.456".into(),
            client_secret: "shh-very-secret".into(),
            redirect_uri: "http://localhost/api/slackLogin".into(),
        };
        let printed = format!("{credentials:?}");
        assert!(printed.contains("123.456"));
        assert!(!printed.contains("shh-very-secret"));
    }

    #[test]
    fn test_token_info_serializes_camel_case() {
        let token = SlackTokenInfo {
            token_type: "Bearer".into(),
            jwt: "j".into(),
            access_token: "a".into(),
        };
        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value, json!({"tokenType": "Bearer", "jwt": "j", "accessToken": "a"}));
    }
}
