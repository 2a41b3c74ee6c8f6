//! Kernel module - data sources, external services and dependencies.

pub mod airtable_source;
pub mod data_source;
pub mod deps;
pub mod local_source;
pub mod session_store;
pub mod test_dependencies;
pub mod traits;
pub mod video_library;

pub use airtable_source::{AirtableDataSource, MainDataSource};
pub use data_source::select_data_source;
pub use deps::ServerDeps;
pub use local_source::LocalDataSource;
pub use session_store::AirtableSessionStore;
pub use test_dependencies::{MockDataSource, MockSessionStore, MockSlackAuth, TestDependencies};
pub use traits::*;
pub use video_library::VideoLibrary;
