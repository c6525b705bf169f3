//! Principal URI helpers
//!
//! Principals are addressed by slash-separated paths such as
//! `principals/users/alice`; the last segment names the user.

use crate::{Error, Result};

/// Split a URI into its parent path and last segment.
///
/// Trailing slashes are ignored. A URI without any slash yields an empty
/// prefix and the whole input as the segment.
pub fn split(uri: &str) -> (&str, &str) {
    let trimmed = uri.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
        None => ("", trimmed),
    }
}

/// Extract the user id from a principal URI
pub fn user_id(principal_uri: &str) -> Result<&str> {
    let (_, uid) = split(principal_uri);
    if uid.is_empty() {
        return Err(Error::InvalidPrincipal(principal_uri.to_string()));
    }
    Ok(uid)
}

/// Build the principal URI of a local user
pub fn user_principal(uid: &str) -> String {
    format!("principals/users/{}", uid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_user_principal() {
        assert_eq!(split("principals/users/alice"), ("principals/users", "alice"));
    }

    #[test]
    fn test_split_trailing_slash() {
        assert_eq!(split("principals/users/bob/"), ("principals/users", "bob"));
    }

    #[test]
    fn test_split_without_separator() {
        assert_eq!(split("carol"), ("", "carol"));
    }

    #[test]
    fn test_user_id() {
        assert_eq!(user_id("principals/users/alice").unwrap(), "alice");
    }

    #[test]
    fn test_user_id_empty() {
        let err = user_id("/").unwrap_err();
        assert!(matches!(err, Error::InvalidPrincipal(_)));
    }

    #[test]
    fn test_user_principal_round_trip() {
        let uri = user_principal("dave");
        assert_eq!(uri, "principals/users/dave");
        assert_eq!(user_id(&uri).unwrap(), "dave");
    }
}
