//! Names of address books generated by applications
//!
//! App-provided address books live next to user address books in the
//! same home collection. Their names are prefixed so they sort last and
//! cannot collide with user-chosen URIs:
//! `z-app-generated--<app-id>--<uri>`.

use ci_core::{Error, Result};

const PREFIX: &str = "z-app-generated";
const DELIMITER: &str = "--";

/// Full collection name for an app-generated address book
pub fn fully_qualified_name(app_id: &str, uri: &str) -> String {
    format!("{PREFIX}{DELIMITER}{app_id}{DELIMITER}{uri}")
}

/// Whether `name` belongs to an app-generated address book
pub fn is_app_generated(name: &str) -> bool {
    name.strip_prefix(PREFIX)
        .is_some_and(|rest| rest.starts_with(DELIMITER))
}

/// Split a fully qualified name into `(app_id, uri)`
pub fn split_fully_qualified_name(name: &str) -> Result<(&str, &str)> {
    let invalid = || Error::Other(format!("Invalid app-generated address book name: {}", name));

    let rest = name
        .strip_prefix(PREFIX)
        .and_then(|rest| rest.strip_prefix(DELIMITER))
        .ok_or_else(invalid)?;
    let (app_id, uri) = rest.split_once(DELIMITER).ok_or_else(invalid)?;

    if app_id.is_empty() || uri.is_empty() {
        return Err(invalid());
    }
    Ok((app_id, uri))
}
