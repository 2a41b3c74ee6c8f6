//! Listing queries for the simple collections.
//!
//! Drafts are hidden unless the environment asks for draft data.

use crate::common::{Event, Opportunity, Partner, Publishable, User, Video};
use crate::config::Env;
use crate::kernel::{DataSource, DataSourceError};

/// Drop drafts unless `env.include_draft_data` is set.
pub fn without_drafts<T: Publishable>(items: Vec<T>, env: &Env) -> Vec<T> {
    if env.include_draft_data {
        return items;
    }
    items.into_iter().filter(|item| !item.is_draft()).collect()
}

pub async fn visible_opportunities(
    ds: &dyn DataSource,
    env: &Env,
) -> Result<Vec<Opportunity>, DataSourceError> {
    Ok(without_drafts(ds.all_opportunities().await?, env))
}

pub async fn visible_events(ds: &dyn DataSource, env: &Env) -> Result<Vec<Event>, DataSourceError> {
    let mut events = without_drafts(ds.all_events().await?, env);
    events.sort_by_key(|event| event.start_time);
    Ok(events)
}

pub async fn all_users(ds: &dyn DataSource) -> Result<Vec<User>, DataSourceError> {
    ds.all_users().await
}

pub async fn all_partners(ds: &dyn DataSource) -> Result<Vec<Partner>, DataSourceError> {
    ds.all_partners().await
}

pub async fn all_videos(ds: &dyn DataSource) -> Result<Vec<Video>, DataSourceError> {
    ds.all_videos().await
}
