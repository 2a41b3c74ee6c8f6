//! Pure Airtable REST API client.
//!
//! A minimal client for the Airtable Web API. Supports listing every record of
//! a table (following `offset` pagination) and creating records.
//!
//! # Example
//!
//! ```rust,ignore
//! use airtable_client::AirtableClient;
//!
//! let client = AirtableClient::new("api-key".into(), "appXXXXXXXXXXXXXX".into());
//!
//! let records = client.list_records::<serde_json::Value>("Projects").await?;
//! for record in &records {
//!     println!("{}", record.id);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{AirtableError, Result};
pub use types::{ListPage, NewRecord, Record};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use types::{CreateRequest, CreateResponse};

const BASE_URL: &str = "https://api.airtable.com/v0";

/// Airtable accepts at most this many records per create call.
const MAX_CREATE_BATCH: usize = 10;

#[derive(Debug, Clone)]
pub struct AirtableClient {
    client: reqwest::Client,
    api_key: String,
    base_id: String,
    base_url: String,
}

impl AirtableClient {
    pub fn new(api_key: String, base_id: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_id,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.base_id, table)
    }

    /// Fetch a single page of records.
    pub async fn list_page<F: DeserializeOwned>(
        &self,
        table: &str,
        offset: Option<&str>,
    ) -> Result<ListPage<F>> {
        let query: Vec<(&str, &str)> = offset.map(|o| ("offset", o)).into_iter().collect();

        let resp = self
            .client
            .get(self.table_url(table))
            .bearer_auth(&self.api_key)
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AirtableError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetch every record of a table, following pagination until exhausted.
    pub async fn list_records<F: DeserializeOwned>(&self, table: &str) -> Result<Vec<Record<F>>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page: ListPage<F> = self.list_page(table, offset.as_deref()).await?;
            records.extend(page.records);

            match page.offset {
                Some(next) => {
                    tracing::debug!(table, fetched = records.len(), "Fetching next Airtable page");
                    offset = Some(next);
                }
                None => break,
            }
        }

        tracing::debug!(table, count = records.len(), "Fetched Airtable records");
        Ok(records)
    }

    /// Create records, batching to Airtable's per-request limit.
    pub async fn create_records<F>(
        &self,
        table: &str,
        records: &[NewRecord<F>],
    ) -> Result<Vec<Record<serde_json::Value>>>
    where
        F: Serialize,
    {
        let mut created = Vec::with_capacity(records.len());

        for chunk in records.chunks(MAX_CREATE_BATCH) {
            let resp = self
                .client
                .post(self.table_url(table))
                .bearer_auth(&self.api_key)
                .json(&CreateRequest { records: chunk })
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(AirtableError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let bytes = resp.bytes().await?;
            let parsed: CreateResponse<serde_json::Value> = serde_json::from_slice(&bytes)?;
            created.extend(parsed.records);
        }

        tracing::info!(table, count = created.len(), "Created Airtable records");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(rename = "Name")]
        name: String,
    }

    fn client_for(server: &MockServer) -> AirtableClient {
        AirtableClient::new("key123".into(), "appBase".into()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_list_records_follows_offset() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/appBase/Projects"))
            .and(query_param("offset", "page2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{"id": "rec2", "fields": {"Name": "Second"}}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/appBase/Projects"))
            .and(header("authorization", "Bearer key123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{"id": "rec1", "createdTime": "2021-05-01T10:00:00.000Z", "fields": {"Name": "First"}}],
                "offset": "page2"
            })))
            .mount(&server)
            .await;

        let records: Vec<Record<Fields>> = client_for(&server)
            .list_records("Projects")
            .await
            .unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.fields.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(records[0].id, "rec1");
        assert!(records[0].created_time.is_some());
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("AUTHENTICATION_REQUIRED"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_records::<serde_json::Value>("Projects")
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("AUTHENTICATION_REQUIRED"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_records::<serde_json::Value>("Projects")
            .await
            .unwrap_err();

        assert!(matches!(err, AirtableError::Parse(_)));
    }

    #[tokio::test]
    async fn test_create_records() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/appBase/Sessions"))
            .and(body_json(json!({"records": [{"fields": {"ID": "jwt"}}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{"id": "recNew", "fields": {"ID": "jwt"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .create_records("Sessions", &[NewRecord { fields: json!({"ID": "jwt"}) }])
            .await
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id, "recNew");
    }
}
