//! Slack login action

use slack_client::{SlackError, SlackUserInfo};
use thiserror::Error;
use tracing::{error, info};

use crate::kernel::ServerDeps;

/// Why a login attempt failed. Each variant maps to the HTTP status the
/// login endpoint answers with; the message is shown to the user as-is.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Query parameter \"code\" is required")]
    MissingCode,

    #[error("One or more function environment variables are not set")]
    SlackNotConfigured,

    #[error("Airtable credentials are not configured")]
    SessionStoreNotConfigured,

    #[error("Code verification failed")]
    CodeVerification(#[source] SlackError),

    #[error("Fetching Slack User Info failed")]
    UserInfo(#[source] SlackError),

    #[error("Unexpected error, pull requests welcome :)")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LoginError {
    pub fn status_code(&self) -> u16 {
        match self {
            LoginError::MissingCode | LoginError::SlackNotConfigured => 400,
            _ => 500,
        }
    }
}

/// Network failures are unexpected; anything Slack actually answered is
/// reported with the step-specific message.
fn classify(err: SlackError, step: fn(SlackError) -> LoginError) -> LoginError {
    match err {
        SlackError::Network(e) => LoginError::Unexpected(Box::new(e)),
        other => step(other),
    }
}

/// Sign a user in with the `code` Slack redirected back with, then record
/// the session.
pub async fn slack_login(code: Option<&str>, deps: &ServerDeps) -> Result<SlackUserInfo, LoginError> {
    let code = code.ok_or(LoginError::MissingCode)?;
    let slack = deps.slack_auth.as_ref().ok_or(LoginError::SlackNotConfigured)?;

    let token = slack
        .exchange_code(code)
        .await
        .map_err(|e| classify(e, LoginError::CodeVerification))?;

    let user = slack
        .user_info(&token)
        .await
        .map_err(|e| classify(e, LoginError::UserInfo))?;

    let sessions = deps
        .session_store
        .as_ref()
        .ok_or(LoginError::SessionStoreNotConfigured)?;

    sessions.write_session(&user).await.map_err(|e| {
        error!(error = %e, "Failed to store Slack session");
        LoginError::Unexpected(Box::new(e))
    })?;

    info!(slack_user_id = %user.user_id, "Slack user signed in");
    Ok(user)
}
