use airtable_client::{AirtableClient, AirtableError, NewRecord};
use async_trait::async_trait;
use serde::Serialize;
use slack_client::SlackUserInfo;

use super::BaseSessionStore;

pub const SESSIONS_TABLE: &str = "Sessions";

#[derive(Debug, Serialize)]
struct SessionFields<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Slack Token")]
    slack_token: &'a str,
    #[serde(rename = "Slack User ID")]
    slack_user_id: &'a str,
}

/// Stores signed-in Slack sessions as rows of the Airtable `Sessions` table,
/// keyed by the OpenID token.
pub struct AirtableSessionStore {
    client: AirtableClient,
}

impl AirtableSessionStore {
    pub fn new(client: AirtableClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseSessionStore for AirtableSessionStore {
    async fn write_session(&self, user: &SlackUserInfo) -> Result<(), AirtableError> {
        let record = NewRecord {
            fields: SessionFields {
                id: &user.slack_token.jwt,
                slack_token: &user.slack_token.access_token,
                slack_user_id: &user.user_id,
            },
        };

        self.client
            .create_records(SESSIONS_TABLE, std::slice::from_ref(&record))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use slack_client::SlackTokenInfo;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_write_session_creates_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/appSessions/Sessions"))
            .and(body_json(json!({"records": [{"fields": {
                "ID": "eyJ.jwt",
                "Slack Token": "xoxp-1",
                "Slack User ID": "U042"
            }}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{"id": "recS1", "fields": {}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = AirtableSessionStore::new(
            AirtableClient::new("key".into(), "appSessions".into()).with_base_url(server.uri()),
        );
        let user = SlackUserInfo {
            user_id: "U042".into(),
            slack_token: SlackTokenInfo {
                token_type: "Bearer".into(),
                jwt: "eyJ.jwt".into(),
                access_token: "xoxp-1".into(),
            },
        };

        store.write_session(&user).await.unwrap();
    }
}
