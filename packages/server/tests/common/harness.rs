//! Test harness for integration testing.
//!
//! Builds ServerDeps from real implementations (the shipped sample content or
//! an Airtable client pointed at a mock server) instead of the in-crate mocks.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use portal_core::kernel::ServerDeps;
use portal_core::server::build_app;
use portal_core::Config;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tower::ServiceExt;

/// Directory holding the sample data shipped with the crate.
pub fn content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("content")
}

pub fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Raw variables pointing the local data source at the shipped samples.
pub fn local_vars(extra: &[(&str, &str)]) -> HashMap<String, String> {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert(
        "LOCAL_DATA_DIR".into(),
        content_dir().join("samples").display().to_string(),
    );
    vars.insert(
        "VIDEO_DIR".into(),
        content_dir().join("videos").display().to_string(),
    );
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    vars
}

pub struct TestHarness {
    pub deps: ServerDeps,
}

impl TestHarness {
    /// Wire the production code path from raw variables.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        init_tracing();
        let config = Config::from_vars(vars).expect("config should load");
        let deps = ServerDeps::from_config(&config).expect("deps should wire");
        Self { deps }
    }

    pub fn with_deps(deps: ServerDeps) -> Self {
        init_tracing();
        Self { deps }
    }

    pub fn app(&self) -> Router {
        build_app(self.deps.clone())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}
