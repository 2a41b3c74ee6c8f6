//! Auth domain actions - business logic functions
//!
//! Actions are async functions called directly from HTTP handlers.

mod slack_login;

pub use slack_login::{slack_login, LoginError};
