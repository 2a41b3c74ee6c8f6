//! Airtable-backed importers for portal content.
//!
//! Each accessor lists one table (following pagination inside the client)
//! and maps the raw record fields onto the domain records. Records keep the
//! order Airtable returns them in.

use airtable_client::{AirtableClient, Record};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{DataSource, DataSourceError, DataSourceResult, VideoLibrary};
use crate::common::{Event, Opportunity, Partner, Project, PublicationStatus, User, Video};

pub const PROJECTS_TABLE: &str = "Projects";
pub const OPPORTUNITIES_TABLE: &str = "Opportunities";
pub const USERS_TABLE: &str = "Users";
pub const EVENTS_TABLE: &str = "Events";
pub const PARTNERS_TABLE: &str = "Partners";

#[derive(Debug, Deserialize)]
struct ProjectFields {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Slug")]
    slug: Option<String>,
    #[serde(rename = "Tagline")]
    tagline: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Cover URL")]
    cover_image_url: Option<String>,
    #[serde(rename = "Logo URL")]
    logo_url: Option<String>,
    #[serde(rename = "Contribute Text")]
    contribute_text: Option<String>,
    #[serde(rename = "Coordinators", default)]
    coordinators: Vec<String>,
    #[serde(rename = "URL")]
    url: Option<String>,
    #[serde(rename = "Finished", default)]
    finished: bool,
    #[serde(rename = "Draft", default)]
    draft: bool,
    #[serde(rename = "Silent", default)]
    silent: bool,
    #[serde(rename = "Highlighted", default)]
    highlighted: bool,
}

#[derive(Debug, Deserialize)]
struct OpportunityFields {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Slug")]
    slug: Option<String>,
    #[serde(rename = "Project", default)]
    project: Vec<String>,
    #[serde(rename = "Cover URL")]
    cover_image_url: Option<String>,
    #[serde(rename = "Summary")]
    summary: Option<String>,
    #[serde(rename = "Time Requirements")]
    time_requirements: Option<String>,
    #[serde(rename = "Owner", default)]
    owner: Vec<String>,
    #[serde(rename = "Contact URL")]
    contact_url: Option<String>,
    #[serde(rename = "Skills", default)]
    skills: Vec<String>,
    #[serde(rename = "Status")]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserFields {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Profile Picture URL")]
    profile_picture_url: Option<String>,
    #[serde(rename = "Slack ID")]
    slack_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventFields {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Slug")]
    slug: Option<String>,
    #[serde(rename = "Summary")]
    summary: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Start Time")]
    start_time: Option<DateTime<Utc>>,
    #[serde(rename = "End Time")]
    end_time: Option<DateTime<Utc>>,
    #[serde(rename = "Owner", default)]
    owner: Vec<String>,
    #[serde(rename = "Project", default)]
    project: Vec<String>,
    #[serde(rename = "Status")]
    status: Option<String>,
    #[serde(rename = "RSVP URL")]
    registration_url: Option<String>,
    #[serde(rename = "Location Title")]
    location_title: Option<String>,
    #[serde(rename = "Location URL")]
    location_url: Option<String>,
    #[serde(rename = "Cover URL")]
    cover_image_url: Option<String>,
    #[serde(rename = "Tags", default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PartnerFields {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Logo URL")]
    logo_url: Option<String>,
    #[serde(rename = "URL")]
    url: Option<String>,
    #[serde(rename = "Categories", default)]
    categories: Vec<String>,
}

/// Reads everything except videos from one Airtable base.
#[derive(Debug, Clone)]
pub struct AirtableDataSource {
    client: AirtableClient,
}

impl AirtableDataSource {
    pub fn new(client: AirtableClient) -> Self {
        Self { client }
    }

    async fn fetch<F: DeserializeOwned>(
        &self,
        table: &'static str,
    ) -> Result<Vec<Record<F>>, DataSourceError> {
        self.client
            .list_records(table)
            .await
            .map_err(|source| DataSourceError::Airtable { table, source })
    }

    pub async fn projects(&self) -> DataSourceResult<Project> {
        self.fetch::<ProjectFields>(PROJECTS_TABLE)
            .await?
            .into_iter()
            .map(|record| -> Result<Project, DataSourceError> {
                let f = record.fields;
                Ok(Project {
                    name: required(PROJECTS_TABLE, &record.id, "Name", f.name)?,
                    slug: required(PROJECTS_TABLE, &record.id, "Slug", f.slug)?,
                    tagline: f.tagline.unwrap_or_default(),
                    description: f.description.unwrap_or_default(),
                    cover_image_url: f.cover_image_url,
                    logo_url: f.logo_url,
                    contribute_text: f.contribute_text,
                    coordinator_ids: f.coordinators,
                    url: f.url,
                    finished: f.finished,
                    draft: f.draft,
                    silent: f.silent,
                    highlighted: f.highlighted,
                    id: record.id,
                })
            })
            .collect()
    }

    pub async fn opportunities(&self) -> DataSourceResult<Opportunity> {
        self.fetch::<OpportunityFields>(OPPORTUNITIES_TABLE)
            .await?
            .into_iter()
            .map(|record| -> Result<Opportunity, DataSourceError> {
                let f = record.fields;
                Ok(Opportunity {
                    name: required(OPPORTUNITIES_TABLE, &record.id, "Name", f.name)?,
                    slug: required(OPPORTUNITIES_TABLE, &record.id, "Slug", f.slug)?,
                    status: status(OPPORTUNITIES_TABLE, &record.id, f.status.as_deref())?,
                    project_id: f.project.into_iter().next(),
                    cover_image_url: f.cover_image_url,
                    summary: f.summary.unwrap_or_default(),
                    time_requirements: f.time_requirements,
                    owner_id: f.owner.into_iter().next(),
                    contact_url: f.contact_url,
                    skills: f.skills,
                    id: record.id,
                })
            })
            .collect()
    }

    pub async fn users(&self) -> DataSourceResult<User> {
        self.fetch::<UserFields>(USERS_TABLE)
            .await?
            .into_iter()
            .map(|record| -> Result<User, DataSourceError> {
                let f = record.fields;
                Ok(User {
                    name: required(USERS_TABLE, &record.id, "Name", f.name)?,
                    profile_picture_url: f.profile_picture_url,
                    slack_id: f.slack_id,
                    id: record.id,
                })
            })
            .collect()
    }

    pub async fn events(&self) -> DataSourceResult<Event> {
        self.fetch::<EventFields>(EVENTS_TABLE)
            .await?
            .into_iter()
            .map(|record| -> Result<Event, DataSourceError> {
                let f = record.fields;
                let start_time = f.start_time.ok_or_else(|| DataSourceError::Mapping {
                    table: EVENTS_TABLE,
                    record_id: record.id.clone(),
                    message: "missing Start Time".to_string(),
                })?;
                Ok(Event {
                    name: required(EVENTS_TABLE, &record.id, "Name", f.name)?,
                    slug: required(EVENTS_TABLE, &record.id, "Slug", f.slug)?,
                    status: status(EVENTS_TABLE, &record.id, f.status.as_deref())?,
                    summary: f.summary.unwrap_or_default(),
                    description: f.description.unwrap_or_default(),
                    start_time,
                    end_time: f.end_time,
                    owner_id: f.owner.into_iter().next(),
                    project_id: f.project.into_iter().next(),
                    registration_url: f.registration_url,
                    location_title: f.location_title,
                    location_url: f.location_url,
                    cover_image_url: f.cover_image_url,
                    tags: f.tags,
                    id: record.id,
                })
            })
            .collect()
    }

    pub async fn partners(&self) -> DataSourceResult<Partner> {
        self.fetch::<PartnerFields>(PARTNERS_TABLE)
            .await?
            .into_iter()
            .map(|record| -> Result<Partner, DataSourceError> {
                let f = record.fields;
                Ok(Partner {
                    name: required(PARTNERS_TABLE, &record.id, "Name", f.name)?,
                    logo_url: f.logo_url,
                    url: f.url,
                    categories: f.categories,
                    id: record.id,
                })
            })
            .collect()
    }
}

fn required(
    table: &'static str,
    record_id: &str,
    field: &str,
    value: Option<String>,
) -> Result<String, DataSourceError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DataSourceError::Mapping {
            table,
            record_id: record_id.to_string(),
            message: format!("missing {field}"),
        })
}

fn status(
    table: &'static str,
    record_id: &str,
    value: Option<&str>,
) -> Result<PublicationStatus, DataSourceError> {
    match value {
        None => Ok(PublicationStatus::Draft),
        Some(raw) => PublicationStatus::parse(raw).ok_or_else(|| DataSourceError::Mapping {
            table,
            record_id: record_id.to_string(),
            message: format!("unknown Status {raw:?}"),
        }),
    }
}

/// Main data source: Airtable for (mostly) everything, the local video
/// library for videos.
pub struct MainDataSource {
    airtable: AirtableDataSource,
    videos: VideoLibrary,
}

impl MainDataSource {
    pub fn new(airtable: AirtableDataSource, videos: VideoLibrary) -> Self {
        Self { airtable, videos }
    }
}

#[async_trait]
impl DataSource for MainDataSource {
    fn name(&self) -> &'static str {
        "airtable"
    }

    async fn all_projects(&self) -> DataSourceResult<Project> {
        self.airtable.projects().await
    }

    async fn all_opportunities(&self) -> DataSourceResult<Opportunity> {
        self.airtable.opportunities().await
    }

    async fn all_users(&self) -> DataSourceResult<User> {
        self.airtable.users().await
    }

    async fn all_events(&self) -> DataSourceResult<Event> {
        self.airtable.events().await
    }

    async fn all_partners(&self) -> DataSourceResult<Partner> {
        self.airtable.partners().await
    }

    async fn all_videos(&self) -> DataSourceResult<Video> {
        self.videos.list().await
    }
}
