//! Projects domain - data behind the project listing and project pages.

pub mod queries;

pub use queries::{
    project_detail, published_project_slugs, visible_projects, ProjectDetail,
    OTHER_PROJECTS_LIMIT,
};
