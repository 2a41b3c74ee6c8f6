//! Process configuration.
//!
//! Everything here is derived once at startup from environment variables
//! (plus an optional `.env` file) and is read-only afterwards. Validation
//! returns a [`ConfigError`]; whether a failure is fatal is the caller's call
//! (the server binary exits with status 1).

use dotenvy::dotenv;
use serde::Serialize;
use slack_client::SlackCredentials;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const VERBOSE_LOG: &str = "VERBOSE_LOG";
pub const INCLUDE_DRAFT_DATA: &str = "INCLUDE_DRAFT_DATA";
pub const DATA_SOURCE_LOCAL: &str = "DATA_SOURCE_LOCAL";
pub const AIRTABLE_API_KEY: &str = "AIRTABLE_API_KEY";
pub const AIRTABLE_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ECOMAIL_API_KEY: &str = "ECOMAIL_API_KEY";
pub const VERCEL_ENV: &str = "VERCEL_ENV";
pub const LOCAL_DATA_DIR: &str = "LOCAL_DATA_DIR";
pub const VIDEO_DIR: &str = "VIDEO_DIR";
pub const PORT: &str = "PORT";

pub const SLACK_CLIENT_ID: &str = "SLACK_CLIENT_ID";
pub const SLACK_CLIENT_SECRET: &str = "SLACK_CLIENT_SECRET";
pub const SLACK_REDIRECT_URI: &str = "SLACK_REDIRECT_URI";
pub const AIRTABLE_SESSIONS_API_KEY: &str = "AIRTABLE_SESSIONS_API_KEY";
pub const AIRTABLE_TRANSLATION_BASE_ID: &str = "AIRTABLE_TRANSLATION_BASE_ID";

const DEFAULT_LOCAL_DATA_DIR: &str = "content/samples";
const DEFAULT_VIDEO_DIR: &str = "content/videos";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Refusing to use local data source for production build.")]
    LocalDataInProduction,

    #[error("{var} has an invalid value: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("{0} must be set")]
    MissingVar(&'static str),
}

/// Which kind of Vercel deployment we are building for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VercelDeploymentType {
    Production,
    Preview,
    Development,
}

impl FromStr for VercelDeploymentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "preview" => Ok(Self::Preview),
            "development" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// Validated configuration snapshot that selects and drives the data source.
#[derive(Clone, PartialEq, Eq)]
pub struct Env {
    pub airtable_api_key: Option<String>,
    pub airtable_base_id: Option<String>,
    pub ecomail_api_key: Option<String>,
    /// Read sample data from disk instead of Airtable.
    pub use_local_data: bool,
    pub verbose_log: bool,
    pub include_draft_data: bool,
    /// `None` when `VERCEL_ENV` is unset (local builds).
    pub vercel_deployment_type: Option<VercelDeploymentType>,
    pub local_data_dir: PathBuf,
    pub video_dir: PathBuf,
}

impl Env {
    /// Derive an [`Env`] from raw key/value pairs.
    ///
    /// Boolean flags are on when the variable is present and non-empty.
    /// Local data is used when forced or when there is no Airtable key, and
    /// that combination is rejected for production deployments.
    pub fn import(raw: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let verbose_log = flag(raw, VERBOSE_LOG);
        let include_draft_data = flag(raw, INCLUDE_DRAFT_DATA);
        let force_local = flag(raw, DATA_SOURCE_LOCAL);
        let airtable_api_key = non_empty(raw, AIRTABLE_API_KEY);
        let ecomail_api_key = non_empty(raw, ECOMAIL_API_KEY);
        let use_local_data = force_local || airtable_api_key.is_none();

        let vercel_deployment_type = match non_empty(raw, VERCEL_ENV) {
            None => None,
            Some(value) => Some(value.parse::<VercelDeploymentType>().map_err(|_| ConfigError::InvalidValue {
                var: VERCEL_ENV,
                value,
            })?),
        };

        if use_local_data && vercel_deployment_type == Some(VercelDeploymentType::Production) {
            return Err(ConfigError::LocalDataInProduction);
        }

        Ok(Self {
            airtable_api_key,
            airtable_base_id: non_empty(raw, AIRTABLE_BASE_ID),
            ecomail_api_key,
            use_local_data,
            verbose_log,
            include_draft_data,
            vercel_deployment_type,
            local_data_dir: non_empty(raw, LOCAL_DATA_DIR)
                .unwrap_or_else(|| DEFAULT_LOCAL_DATA_DIR.to_string())
                .into(),
            video_dir: non_empty(raw, VIDEO_DIR)
                .unwrap_or_else(|| DEFAULT_VIDEO_DIR.to_string())
                .into(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.vercel_deployment_type == Some(VercelDeploymentType::Production)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("airtable_api_key", &redacted(&self.airtable_api_key))
            .field("airtable_base_id", &self.airtable_base_id)
            .field("ecomail_api_key", &redacted(&self.ecomail_api_key))
            .field("use_local_data", &self.use_local_data)
            .field("verbose_log", &self.verbose_log)
            .field("include_draft_data", &self.include_draft_data)
            .field("vercel_deployment_type", &self.vercel_deployment_type)
            .field("local_data_dir", &self.local_data_dir)
            .field("video_dir", &self.video_dir)
            .finish()
    }
}

/// Credentials for the Airtable base the login flow writes sessions to.
#[derive(Clone)]
pub struct SessionStoreConfig {
    pub api_key: String,
    pub base_id: String,
}

impl fmt::Debug for SessionStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStoreConfig")
            .field("api_key", &"<redacted>")
            .field("base_id", &self.base_id)
            .finish()
    }
}

/// Slack login settings. Each half is optional at startup; the login
/// endpoint reports what is missing per request.
#[derive(Debug, Clone, Default)]
pub struct LoginConfig {
    pub slack: Option<SlackCredentials>,
    pub sessions: Option<SessionStoreConfig>,
}

impl LoginConfig {
    pub fn import(raw: &HashMap<String, String>) -> Self {
        let slack = match (
            non_empty(raw, SLACK_CLIENT_ID),
            non_empty(raw, SLACK_CLIENT_SECRET),
            non_empty(raw, SLACK_REDIRECT_URI),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Some(SlackCredentials {
                client_id,
                client_secret,
                redirect_uri,
            }),
            _ => None,
        };

        let sessions = match (
            non_empty(raw, AIRTABLE_SESSIONS_API_KEY),
            non_empty(raw, AIRTABLE_TRANSLATION_BASE_ID),
        ) {
            (Some(api_key), Some(base_id)) => Some(SessionStoreConfig { api_key, base_id }),
            _ => None,
        };

        Self { slack, sessions }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub env: Env,
    pub login: LoginConfig,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();

        let raw: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&raw)
    }

    pub fn from_vars(raw: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let env = Env::import(raw)?;

        let port = match non_empty(raw, PORT) {
            None => DEFAULT_PORT,
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: PORT,
                value,
            })?,
        };

        Ok(Self {
            env,
            login: LoginConfig::import(raw),
            port,
        })
    }
}

fn non_empty(raw: &HashMap<String, String>, key: &str) -> Option<String> {
    raw.get(key).filter(|v| !v.is_empty()).cloned()
}

fn flag(raw: &HashMap<String, String>, key: &str) -> bool {
    raw.get(key).is_some_and(|v| !v.is_empty())
}

fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}
