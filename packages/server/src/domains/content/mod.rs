//! Content domain - opportunities, events, users, partners and videos as
//! the portal lists them.

pub mod queries;

pub use queries::*;
