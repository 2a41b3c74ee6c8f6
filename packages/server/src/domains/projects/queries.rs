//! Project page data.
//!
//! Assembles what a project page needs: the project, its coordinators and a
//! few other projects to link to.

use serde::Serialize;

use crate::common::{Project, User};
use crate::config::Env;
use crate::domains::content::without_drafts;
use crate::kernel::{DataSource, DataSourceError};

/// How many other projects a project page links to
pub const OTHER_PROJECTS_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub project: Project,
    pub coordinators: Vec<User>,
    pub other_projects: Vec<Project>,
}

/// Projects shown on listing pages. Silent projects are never listed, drafts
/// only when requested.
pub async fn visible_projects(ds: &dyn DataSource, env: &Env) -> Result<Vec<Project>, DataSourceError> {
    Ok(without_drafts(ds.all_projects().await?, env)
        .into_iter()
        .filter(|p| !p.silent)
        .collect())
}

/// Slugs of every project that gets its own page: neither draft nor silent.
pub async fn published_project_slugs(ds: &dyn DataSource) -> Result<Vec<String>, DataSourceError> {
    Ok(ds
        .all_projects()
        .await?
        .into_iter()
        .filter(|p| !p.draft && !p.silent)
        .map(|p| p.slug)
        .collect())
}

/// Load the data for one project page. `None` when no visible project has
/// this slug; silent projects have no page.
pub async fn project_detail(
    ds: &dyn DataSource,
    env: &Env,
    slug: &str,
) -> Result<Option<ProjectDetail>, DataSourceError> {
    let (projects, users) = tokio::try_join!(ds.all_projects(), ds.all_users())?;
    let projects = without_drafts(projects, env);

    let Some(project) = projects
        .iter()
        .find(|p| p.slug == slug && !p.silent)
        .cloned()
    else {
        return Ok(None);
    };

    let coordinators = project
        .coordinator_ids
        .iter()
        .filter_map(|id| {
            let user = users.iter().find(|u| &u.id == id).cloned();
            if user.is_none() {
                tracing::warn!(project = %project.slug, user_id = %id, "Coordinator not found");
            }
            user
        })
        .collect();

    let other_projects = projects
        .into_iter()
        .filter(|p| p.id != project.id && !p.silent)
        .take(OTHER_PROJECTS_LIMIT)
        .collect();

    Ok(Some(ProjectDetail {
        project,
        coordinators,
        other_projects,
    }))
}
