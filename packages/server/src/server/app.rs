//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    events_handler, health_handler, opportunities_handler, partners_handler,
    project_detail_handler, project_slugs_handler, projects_handler, slack_authorize_handler,
    slack_login_handler, users_handler, videos_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

impl AppState {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            deps: Arc::new(deps),
        }
    }
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let app_state = AppState::new(deps);

    // CORS configuration - the portal API is public and read-only
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        // Portal content
        .route("/api/projects", get(projects_handler))
        .route("/api/projects/:slug", get(project_detail_handler))
        .route("/api/project-slugs", get(project_slugs_handler))
        .route("/api/opportunities", get(opportunities_handler))
        .route("/api/users", get(users_handler))
        .route("/api/events", get(events_handler))
        .route("/api/partners", get(partners_handler))
        .route("/api/videos", get(videos_handler))
        // Slack login
        .route("/api/slackLogin", get(slack_login_handler))
        .route("/api/slackAuthorize", get(slack_authorize_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Project, User};
    use crate::kernel::test_dependencies::test_env;
    use crate::kernel::{MockDataSource, MockSessionStore, MockSlackAuth, TestDependencies};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn project(slug: &str, draft: bool) -> Project {
        Project {
            id: format!("rec-{slug}"),
            name: slug.to_string(),
            slug: slug.to_string(),
            tagline: String::new(),
            description: String::new(),
            cover_image_url: None,
            logo_url: None,
            contribute_text: None,
            coordinator_ids: vec!["u1".into()],
            url: None,
            finished: false,
            draft,
            silent: false,
            highlighted: false,
        }
    }

    fn app_with(ds: MockDataSource) -> Router {
        build_app(
            TestDependencies::new()
                .with_data_source(Arc::new(ds))
                .into_server_deps(),
        )
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn catalog() -> MockDataSource {
        MockDataSource::new()
            .with_projects(vec![project("live", false), project("wip", true)])
            .with_users(vec![User {
                id: "u1".into(),
                name: "Jana".into(),
                profile_picture_url: None,
                slack_id: None,
            }])
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app_with(MockDataSource::new()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["dataSource"], "mock");
        assert_eq!(body["useLocalData"], true);
    }

    #[tokio::test]
    async fn test_projects_hide_drafts() {
        let (status, body) = get_json(app_with(catalog()), "/api/projects").await;
        assert_eq!(status, StatusCode::OK);
        let projects = body.as_array().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0]["slug"], "live");
    }

    #[tokio::test]
    async fn test_project_detail() {
        let (status, body) = get_json(app_with(catalog()), "/api/projects/live").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["slug"], "live");
        assert_eq!(body["coordinators"][0]["name"], "Jana");
        assert_eq!(body["otherProjects"].as_array().unwrap().len(), 0);

        let (status, _) = get_json(app_with(catalog()), "/api/projects/wip").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_draft_detail_visible_with_draft_data() {
        let app = build_app(
            TestDependencies::new()
                .with_env(test_env(&[("INCLUDE_DRAFT_DATA", "1")]))
                .with_data_source(Arc::new(catalog()))
                .into_server_deps(),
        );
        let (status, body) = get_json(app, "/api/projects/wip").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["draft"], true);
    }

    #[tokio::test]
    async fn test_data_source_error_is_bad_gateway() {
        let (status, body) = get_json(app_with(catalog().failing()), "/api/projects").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("simulated failure"));
    }

    #[tokio::test]
    async fn test_slack_login_without_code() {
        let (status, _) = get_json(app_with(MockDataSource::new()), "/api/slackLogin").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_slack_login_success() {
        let app = build_app(
            TestDependencies::new()
                .with_slack_auth(Arc::new(MockSlackAuth::new("abc", "U1")))
                .with_session_store(Arc::new(MockSessionStore::new()))
                .into_server_deps(),
        );
        let (status, body) = get_json(app, "/api/slackLogin?code=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "success");
        assert_eq!(body["slackInfo"]["userId"], "U1");
        assert_eq!(body["slackInfo"]["slackToken"]["jwt"], "jwt-abc");
    }

    #[tokio::test]
    async fn test_slack_authorize_redirects() {
        let app = build_app(
            TestDependencies::new()
                .with_slack_auth(Arc::new(MockSlackAuth::new("abc", "U1")))
                .into_server_deps(),
        );
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/slackAuthorize")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()["location"].to_str().unwrap();
        assert!(location.starts_with("https://slack.com/openid/connect/authorize?"));
    }
}
