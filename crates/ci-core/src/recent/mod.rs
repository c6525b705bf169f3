//! Recent contacts
//!
//! Records of people a user has recently interacted with, kept per
//! owning user ("actor") in SQLite.

mod store;
mod types;

pub use store::{RecentContactStore, SqliteRecentContactStore};
pub use types::{NewRecentContact, RecentContact};
