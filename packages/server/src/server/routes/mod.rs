// HTTP routes
pub mod content;
pub mod error;
pub mod health;
pub mod projects;
pub mod slack;

pub use content::*;
pub use error::ApiError;
pub use health::*;
pub use projects::*;
pub use slack::*;
