use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single Airtable record with typed fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Record<F> {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: Option<DateTime<Utc>>,
    pub fields: F,
}

/// One page of a `GET /{base}/{table}` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage<F> {
    pub records: Vec<Record<F>>,
    /// Present while more pages remain.
    #[serde(default)]
    pub offset: Option<String>,
}

/// Fields payload for record creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecord<F> {
    pub fields: F,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateRequest<'a, F> {
    pub records: &'a [NewRecord<F>],
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateResponse<F> {
    pub records: Vec<Record<F>>,
}
