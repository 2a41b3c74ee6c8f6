//! Local sample data, used for development builds without Airtable access.
//!
//! Each collection is one JSON array file (`projects.json`, `users.json`, ...)
//! in the same camelCase shape the HTTP API serves. A missing file is an
//! empty collection. Sequence order is file order.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use super::{DataSource, DataSourceError, DataSourceResult, VideoLibrary};
use crate::common::{Event, Opportunity, Partner, Project, User, Video};

pub struct LocalDataSource {
    dir: PathBuf,
    videos: VideoLibrary,
}

impl LocalDataSource {
    pub fn new(dir: impl Into<PathBuf>, videos: VideoLibrary) -> Self {
        Self {
            dir: dir.into(),
            videos,
        }
    }

    async fn read_collection<T: DeserializeOwned>(&self, file: &str) -> DataSourceResult<T> {
        let path = self.dir.join(file);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Sample file missing, using empty collection");
                return Ok(Vec::new());
            }
            Err(source) => return Err(DataSourceError::Io { path, source }),
        };

        serde_json::from_slice(&bytes).map_err(|source| DataSourceError::Parse { path, source })
    }
}

#[async_trait]
impl DataSource for LocalDataSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn all_projects(&self) -> DataSourceResult<Project> {
        self.read_collection("projects.json").await
    }

    async fn all_opportunities(&self) -> DataSourceResult<Opportunity> {
        self.read_collection("opportunities.json").await
    }

    async fn all_users(&self) -> DataSourceResult<User> {
        self.read_collection("users.json").await
    }

    async fn all_events(&self) -> DataSourceResult<Event> {
        self.read_collection("events.json").await
    }

    async fn all_partners(&self) -> DataSourceResult<Partner> {
        self.read_collection("partners.json").await
    }

    async fn all_videos(&self) -> DataSourceResult<Video> {
        self.videos.list().await
    }
}
