// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Page queries and the login flow are domain functions that use these traits.
//
// Naming convention: Base* for external service traits (e.g., BaseSlackAuth)

use airtable_client::AirtableError;
use async_trait::async_trait;
use slack_client::{SlackError, SlackTokenInfo, SlackUserInfo};
use std::path::PathBuf;
use thiserror::Error;

use crate::common::{Event, Opportunity, Partner, Project, User, Video};

// =============================================================================
// Data Source (read-only access to portal content)
// =============================================================================

/// Failure of a single data source accessor. Never retried at this layer.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Airtable request for {table} failed: {source}")]
    Airtable {
        table: &'static str,
        #[source]
        source: AirtableError,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record {record_id} in {table} is invalid: {message}")]
    Mapping {
        table: &'static str,
        record_id: String,
        message: String,
    },
}

pub type DataSourceResult<T> = std::result::Result<Vec<T>, DataSourceError>;

/// An abstraction over the places portal content can come from.
///
/// Callers know nothing about Airtable or the filesystem. Every accessor is
/// independent: two calls may observe different snapshots, and sequence order
/// is whatever the implementation documents.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short identifier for logs and the health endpoint
    fn name(&self) -> &'static str;

    async fn all_projects(&self) -> DataSourceResult<Project>;
    async fn all_opportunities(&self) -> DataSourceResult<Opportunity>;
    async fn all_users(&self) -> DataSourceResult<User>;
    async fn all_events(&self) -> DataSourceResult<Event>;
    async fn all_partners(&self) -> DataSourceResult<Partner>;
    async fn all_videos(&self) -> DataSourceResult<Video>;
}

// =============================================================================
// Slack Sign-in Trait (Infrastructure - OpenID Connect)
// =============================================================================

#[async_trait]
pub trait BaseSlackAuth: Send + Sync {
    /// URL the user is sent to for "Sign in with Slack"
    fn authorize_url(&self) -> String;

    /// Exchange the authorization code for tokens
    async fn exchange_code(&self, code: &str) -> Result<SlackTokenInfo, SlackError>;

    /// Resolve the Slack user the tokens belong to
    async fn user_info(&self, token: &SlackTokenInfo) -> Result<SlackUserInfo, SlackError>;
}

// =============================================================================
// Session Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseSessionStore: Send + Sync {
    /// Persist a freshly signed-in Slack session
    async fn write_session(&self, user: &SlackUserInfo) -> Result<(), AirtableError>;
}
