//! Auth domain - "Sign in with Slack"
//!
//! Responsibilities:
//! - Exchange the OpenID Connect code Slack redirects back with
//! - Resolve the Slack user id
//! - Record the session in Airtable

pub mod actions;

pub use actions::{slack_login, LoginError};
