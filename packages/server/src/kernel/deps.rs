//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container handed to routes and
//! domain functions. It replaces process-wide singletons: `main` builds one
//! from [`Config`] and tests build their own from mocks.

use airtable_client::AirtableClient;
use async_trait::async_trait;
use slack_client::{SlackError, SlackOidcClient, SlackTokenInfo, SlackUserInfo};
use std::sync::Arc;

use crate::config::{Config, ConfigError, Env};
use crate::kernel::{
    select_data_source, AirtableSessionStore, BaseSessionStore, BaseSlackAuth, DataSource,
};

// =============================================================================
// SlackOidcClient (implements BaseSlackAuth trait)
// =============================================================================

#[async_trait]
impl BaseSlackAuth for SlackOidcClient {
    fn authorize_url(&self) -> String {
        SlackOidcClient::authorize_url(self)
    }

    async fn exchange_code(&self, code: &str) -> Result<SlackTokenInfo, SlackError> {
        SlackOidcClient::exchange_code(self, code).await
    }

    async fn user_info(&self, token: &SlackTokenInfo) -> Result<SlackUserInfo, SlackError> {
        SlackOidcClient::user_info(self, token).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies shared by every request. Immutable after construction.
#[derive(Clone)]
pub struct ServerDeps {
    pub env: Arc<Env>,
    pub data_source: Arc<dyn DataSource>,
    /// None when the SLACK_* variables are not all set
    pub slack_auth: Option<Arc<dyn BaseSlackAuth>>,
    /// None when the Airtable session credentials are not set
    pub session_store: Option<Arc<dyn BaseSessionStore>>,
}

impl ServerDeps {
    pub fn new(
        env: Env,
        data_source: Arc<dyn DataSource>,
        slack_auth: Option<Arc<dyn BaseSlackAuth>>,
        session_store: Option<Arc<dyn BaseSessionStore>>,
    ) -> Self {
        Self {
            env: Arc::new(env),
            data_source,
            slack_auth,
            session_store,
        }
    }

    /// Wire the production implementations for a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let data_source = select_data_source(&config.env)?;

        let slack_auth = config.login.slack.clone().map(|credentials| {
            Arc::new(SlackOidcClient::new(credentials)) as Arc<dyn BaseSlackAuth>
        });

        let session_store = config.login.sessions.clone().map(|sessions| {
            let client = AirtableClient::new(sessions.api_key, sessions.base_id);
            Arc::new(AirtableSessionStore::new(client)) as Arc<dyn BaseSessionStore>
        });

        if slack_auth.is_none() {
            tracing::warn!("Slack login is not configured; /api/slackLogin will reject requests");
        }

        Ok(Self::new(
            config.env.clone(),
            data_source,
            slack_auth,
            session_store,
        ))
    }
}
