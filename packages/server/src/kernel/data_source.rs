//! Data source selection.

use airtable_client::AirtableClient;
use std::sync::Arc;

use super::{AirtableDataSource, DataSource, LocalDataSource, MainDataSource, VideoLibrary};
use crate::config::{ConfigError, Env, AIRTABLE_API_KEY, AIRTABLE_BASE_ID};

/// Bind the [`DataSource`] interface to the implementation `env` asks for.
///
/// Local sample data when `use_local_data` is set, otherwise Airtable plus
/// the local video library. Called once at startup.
pub fn select_data_source(env: &Env) -> Result<Arc<dyn DataSource>, ConfigError> {
    let videos = VideoLibrary::new(env.video_dir.clone());

    if env.use_local_data {
        tracing::info!(
            dir = %env.local_data_dir.display(),
            videos = %env.video_dir.display(),
            "Using local data source"
        );
        return Ok(Arc::new(LocalDataSource::new(
            env.local_data_dir.clone(),
            videos,
        )));
    }

    let api_key = env
        .airtable_api_key
        .clone()
        .ok_or(ConfigError::MissingVar(AIRTABLE_API_KEY))?;
    let base_id = env
        .airtable_base_id
        .clone()
        .ok_or(ConfigError::MissingVar(AIRTABLE_BASE_ID))?;

    tracing::info!(base_id = %base_id, videos = %env.video_dir.display(), "Using Airtable data source");
    let airtable = AirtableDataSource::new(AirtableClient::new(api_key, base_id));
    Ok(Arc::new(MainDataSource::new(airtable, videos)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> Env {
        let raw: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Env::import(&raw).unwrap()
    }

    #[test]
    fn test_local_flag_selects_local_source() {
        let source = select_data_source(&env(&[("DATA_SOURCE_LOCAL", "1"), ("AIRTABLE_API_KEY", "k")]))
            .unwrap();
        assert_eq!(source.name(), "local");
    }

    #[test]
    fn test_no_key_selects_local_source() {
        let source = select_data_source(&env(&[])).unwrap();
        assert_eq!(source.name(), "local");
    }

    #[test]
    fn test_key_and_base_select_airtable() {
        let source =
            select_data_source(&env(&[("AIRTABLE_API_KEY", "k"), ("AIRTABLE_BASE_ID", "appX")]))
                .unwrap();
        assert_eq!(source.name(), "airtable");
    }

    #[test]
    fn test_airtable_without_base_id_fails() {
        let err = select_data_source(&env(&[("AIRTABLE_API_KEY", "k")])).err();
        assert_eq!(err, Some(ConfigError::MissingVar(AIRTABLE_BASE_ID)));
    }
}
