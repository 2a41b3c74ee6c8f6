//! Local video lister.
//!
//! Videos are not kept in Airtable; each one is a JSON metadata file in a
//! directory on disk. The listing is sorted by slug so repeated calls return
//! the same sequence.

use std::path::{Path, PathBuf};

use super::{DataSourceError, DataSourceResult};
use crate::common::Video;

#[derive(Debug, Clone)]
pub struct VideoLibrary {
    dir: PathBuf,
}

impl VideoLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read every `*.json` file in the library directory.
    ///
    /// A missing directory is an empty library, not an error.
    pub async fn list(&self) -> DataSourceResult<Video> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(dir = %self.dir.display(), "Video directory not found, no videos listed");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(DataSourceError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut videos = Vec::new();
        loop {
            let entry = entries
                .next_entry()
                .await
                .map_err(|source| DataSourceError::Io {
                    path: self.dir.clone(),
                    source,
                })?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            videos.push(read_video(&path).await?);
        }

        videos.sort_by(|a, b| a.slug.cmp(&b.slug));
        tracing::debug!(count = videos.len(), dir = %self.dir.display(), "Listed videos");
        Ok(videos)
    }
}

async fn read_video(path: &Path) -> Result<Video, DataSourceError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DataSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut video: Video = serde_json::from_slice(&bytes).map_err(|source| DataSourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if video.slug.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            video.slug = stem.to_string();
        }
    }

    Ok(video)
}
