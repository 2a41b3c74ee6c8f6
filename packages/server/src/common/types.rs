// Common types used across multiple domains and layers
//
// These are the portal's domain records. Data sources produce them, page
// queries and HTTP routes consume them. Nothing here knows about Airtable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state shared by opportunities and events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    #[default]
    Draft,
    Live,
    Unlisted,
}

impl PublicationStatus {
    /// Parse an Airtable single-select value ("Draft", "live", ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "live" => Some(Self::Live),
            "unlisted" => Some(Self::Unlisted),
            _ => None,
        }
    }
}

/// Records that can be hidden from public builds while still being drafted.
pub trait Publishable {
    fn is_draft(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Call to action while running, thank-you text once finished.
    #[serde(default)]
    pub contribute_text: Option<String>,
    #[serde(default)]
    pub coordinator_ids: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub draft: bool,
    /// Published but not listed anywhere.
    #[serde(default)]
    pub silent: bool,
    #[serde(default)]
    pub highlighted: bool,
}

impl Publishable for Project {
    fn is_draft(&self) -> bool {
        self.draft
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub time_requirements: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub contact_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: PublicationStatus,
}

impl Publishable for Opportunity {
    fn is_draft(&self) -> bool {
        self.status == PublicationStatus::Draft
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub slack_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub status: PublicationStatus,
    #[serde(default)]
    pub registration_url: Option<String>,
    #[serde(default)]
    pub location_title: Option<String>,
    #[serde(default)]
    pub location_url: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Publishable for Event {
    fn is_draft(&self) -> bool {
        self.status == PublicationStatus::Draft
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A chapter marker inside a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Falls back to the file name when the metadata omits it.
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub video_url: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}
