// Business domains
pub mod auth;
pub mod content;
pub mod projects;
