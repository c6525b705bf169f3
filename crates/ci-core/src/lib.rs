//! ci-core: Contacts Interaction Core Library
//!
//! Recent-contact records, their SQLite store, the interaction recorder
//! that fills it, and the configuration, localization and principal
//! helpers shared by the DAV layer and the binary.

pub mod config;
pub mod error;
pub mod interaction;
pub mod l10n;
pub mod principal;
pub mod recent;
pub mod vcard;

pub use config::{AppConfig, CleanupConfig, Config, DatabaseConfig, L10nConfig};
pub use error::{Error, Result};
pub use interaction::{ContactInteraction, IgnoreReason, InteractionRecorder, RecordOutcome};
pub use l10n::{Catalog, L10n};
pub use recent::{NewRecentContact, RecentContact, RecentContactStore, SqliteRecentContactStore};

/// Application identifier the address book is registered under
pub const APP_ID: &str = "contactsinteraction";
