// Volunteer portal - data core
//
// Page-generation code reads projects, opportunities, users, events, partners
// and videos through the `DataSource` trait. Which implementation backs it
// (Airtable or local sample data) is decided once from the validated `Env`.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
