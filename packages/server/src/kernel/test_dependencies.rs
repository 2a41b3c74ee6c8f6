// TestDependencies - mock implementations for testing
//
// Provides in-memory services that can be injected into ServerDeps for tests.

use airtable_client::AirtableError;
use async_trait::async_trait;
use slack_client::{SlackError, SlackTokenInfo, SlackUserInfo};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseSessionStore, BaseSlackAuth, DataSource, DataSourceError, DataSourceResult};
use crate::common::{Event, Opportunity, Partner, Project, User, Video};
use crate::config::Env;
use crate::kernel::ServerDeps;

// =============================================================================
// Mock Data Source
// =============================================================================

/// In-memory data source. Collections are returned as configured; a failing
/// collection can be simulated with [`MockDataSource::failing`].
#[derive(Default)]
pub struct MockDataSource {
    pub projects: Vec<Project>,
    pub opportunities: Vec<Opportunity>,
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub partners: Vec<Partner>,
    pub videos: Vec<Video>,
    fail_projects: bool,
    calls: Arc<Mutex<HashMap<&'static str, usize>>>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn with_opportunities(mut self, opportunities: Vec<Opportunity>) -> Self {
        self.opportunities = opportunities;
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    /// Make `all_projects` fail like an upstream outage.
    pub fn failing(mut self) -> Self {
        self.fail_projects = true;
        self
    }

    /// How many times an accessor was called.
    pub fn call_count(&self, accessor: &str) -> usize {
        self.calls.lock().unwrap().get(accessor).copied().unwrap_or(0)
    }

    fn record(&self, accessor: &'static str) {
        *self.calls.lock().unwrap().entry(accessor).or_default() += 1;
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn all_projects(&self) -> DataSourceResult<Project> {
        self.record("all_projects");
        if self.fail_projects {
            return Err(DataSourceError::Mapping {
                table: "Projects",
                record_id: "recMock".to_string(),
                message: "simulated failure".to_string(),
            });
        }
        Ok(self.projects.clone())
    }

    async fn all_opportunities(&self) -> DataSourceResult<Opportunity> {
        self.record("all_opportunities");
        Ok(self.opportunities.clone())
    }

    async fn all_users(&self) -> DataSourceResult<User> {
        self.record("all_users");
        Ok(self.users.clone())
    }

    async fn all_events(&self) -> DataSourceResult<Event> {
        self.record("all_events");
        Ok(self.events.clone())
    }

    async fn all_partners(&self) -> DataSourceResult<Partner> {
        self.record("all_partners");
        Ok(self.partners.clone())
    }

    async fn all_videos(&self) -> DataSourceResult<Video> {
        self.record("all_videos");
        Ok(self.videos.clone())
    }
}

// =============================================================================
// Mock Slack Auth
// =============================================================================

pub struct MockSlackAuth {
    /// Codes Slack will accept
    accepted_code: String,
    user_id: String,
    reject_user_info: bool,
    exchanged: Arc<Mutex<Vec<String>>>,
}

impl MockSlackAuth {
    pub fn new(accepted_code: &str, user_id: &str) -> Self {
        Self {
            accepted_code: accepted_code.to_string(),
            user_id: user_id.to_string(),
            reject_user_info: false,
            exchanged: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Accept the code but reject the user info lookup
    pub fn rejecting_user_info(mut self) -> Self {
        self.reject_user_info = true;
        self
    }

    pub fn exchanged_codes(&self) -> Vec<String> {
        self.exchanged.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseSlackAuth for MockSlackAuth {
    fn authorize_url(&self) -> String {
        slack_client::authorize_url("mock-client", "http://localhost/api/slackLogin")
    }

    async fn exchange_code(&self, code: &str) -> Result<SlackTokenInfo, SlackError> {
        self.exchanged.lock().unwrap().push(code.to_string());
        if code != self.accepted_code {
            return Err(SlackError::Rejected {
                endpoint: "openid.connect.token",
                reason: "invalid_code".to_string(),
            });
        }
        Ok(SlackTokenInfo {
            token_type: "Bearer".to_string(),
            jwt: format!("jwt-{code}"),
            access_token: "xoxp-mock".to_string(),
        })
    }

    async fn user_info(&self, token: &SlackTokenInfo) -> Result<SlackUserInfo, SlackError> {
        if self.reject_user_info {
            return Err(SlackError::Rejected {
                endpoint: "openid.connect.userInfo",
                reason: "invalid_auth".to_string(),
            });
        }
        Ok(SlackUserInfo {
            user_id: self.user_id.clone(),
            slack_token: token.clone(),
        })
    }
}

// =============================================================================
// Mock Session Store
// =============================================================================

#[derive(Default)]
pub struct MockSessionStore {
    sessions: Arc<Mutex<Vec<SlackUserInfo>>>,
    fail: bool,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails as if Airtable were down
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sessions(&self) -> Vec<SlackUserInfo> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseSessionStore for MockSessionStore {
    async fn write_session(&self, user: &SlackUserInfo) -> Result<(), AirtableError> {
        if self.fail {
            return Err(AirtableError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        self.sessions.lock().unwrap().push(user.clone());
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for ServerDeps backed by mocks
pub struct TestDependencies {
    pub env: Env,
    pub data_source: Arc<dyn DataSource>,
    pub slack_auth: Option<Arc<dyn BaseSlackAuth>>,
    pub session_store: Option<Arc<dyn BaseSessionStore>>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            env: test_env(&[]),
            data_source: Arc::new(MockDataSource::new()),
            slack_auth: None,
            session_store: None,
        }
    }

    pub fn with_env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    pub fn with_data_source(mut self, data_source: Arc<dyn DataSource>) -> Self {
        self.data_source = data_source;
        self
    }

    pub fn with_slack_auth(mut self, slack_auth: Arc<dyn BaseSlackAuth>) -> Self {
        self.slack_auth = Some(slack_auth);
        self
    }

    pub fn with_session_store(mut self, session_store: Arc<dyn BaseSessionStore>) -> Self {
        self.session_store = Some(session_store);
        self
    }

    pub fn into_server_deps(self) -> ServerDeps {
        ServerDeps::new(
            self.env,
            self.data_source,
            self.slack_auth,
            self.session_store,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an [`Env`] from literal pairs; panics on invalid combinations.
pub fn test_env(pairs: &[(&str, &str)]) -> Env {
    let raw: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Env::import(&raw).expect("test env should be valid")
}
