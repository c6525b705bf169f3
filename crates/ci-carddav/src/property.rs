//! DAV property names and values

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// WebDAV namespace
pub const NS_DAV: &str = "DAV:";
/// ownCloud/Nextcloud extension namespace
pub const NS_OWNCLOUD: &str = "http://owncloud.org/ns";

/// `principaluri` carries no namespace; it is read by the host's sharing layer
pub const PRINCIPAL_URI: PropertyName = PropertyName::from_static("", "principaluri");
pub const DISPLAY_NAME: PropertyName = PropertyName::from_static(NS_DAV, "displayname");
pub const READ_ONLY: PropertyName = PropertyName::from_static(NS_OWNCLOUD, "read-only");

/// A namespaced property name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyName {
    namespace: Cow<'static, str>,
    name: Cow<'static, str>,
}

impl PropertyName {
    pub const fn from_static(namespace: &'static str, name: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(namespace),
            name: Cow::Borrowed(name),
        }
    }

    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Cow::Owned(namespace.into()),
            name: Cow::Owned(name.into()),
        }
    }

    /// Parse Clark notation (`{ns}name`); a bare name has no namespace
    pub fn parse_clark(clark: &str) -> Option<Self> {
        match clark.strip_prefix('{') {
            Some(rest) => {
                let (namespace, name) = rest.split_once('}')?;
                if name.is_empty() {
                    return None;
                }
                Some(Self::new(namespace, name))
            }
            None if !clark.is_empty() => Some(Self::new("", clark)),
            None => None,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.name)
        }
    }
}

/// A property value as handed to the serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Bool(bool),
    Href(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(text) | PropertyValue::Href(text) => f.write_str(text),
            PropertyValue::Bool(value) => write!(f, "{}", if *value { 1 } else { 0 }),
        }
    }
}

/// Properties of one resource, ordered by name
pub type Properties = BTreeMap<PropertyName, PropertyValue>;

/// A PROPPATCH request: `None` removes the property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropPatch {
    mutations: BTreeMap<PropertyName, Option<PropertyValue>>,
}

impl PropPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: PropertyName, value: PropertyValue) -> Self {
        self.mutations.insert(name, Some(value));
        self
    }

    pub fn remove(mut self, name: PropertyName) -> Self {
        self.mutations.insert(name, None);
        self
    }

    pub fn mutations(&self) -> impl Iterator<Item = (&PropertyName, Option<&PropertyValue>)> {
        self.mutations.iter().map(|(name, value)| (name, value.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clark_display() {
        assert_eq!(DISPLAY_NAME.to_string(), "{DAV:}displayname");
        assert_eq!(READ_ONLY.to_string(), "{http://owncloud.org/ns}read-only");
        assert_eq!(PRINCIPAL_URI.to_string(), "principaluri");
    }

    #[test]
    fn test_parse_clark() {
        assert_eq!(PropertyName::parse_clark("{DAV:}displayname"), Some(DISPLAY_NAME));
        assert_eq!(PropertyName::parse_clark("principaluri"), Some(PRINCIPAL_URI));
        assert_eq!(PropertyName::parse_clark("{DAV:"), None);
        assert_eq!(PropertyName::parse_clark("{DAV:}"), None);
        assert_eq!(PropertyName::parse_clark(""), None);
    }

    #[test]
    fn test_static_and_owned_names_compare_equal() {
        assert_eq!(PropertyName::new("DAV:", "displayname"), DISPLAY_NAME);
    }

    #[test]
    fn test_prop_patch() {
        let patch = PropPatch::new()
            .set(DISPLAY_NAME, PropertyValue::Text("Renamed".into()))
            .remove(READ_ONLY);

        let mutations: Vec<_> = patch.mutations().collect();
        assert_eq!(mutations.len(), 2);
        assert!(mutations.contains(&(&READ_ONLY, None)));
        assert!(!patch.is_empty());
    }
}
