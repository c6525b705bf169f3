//! Capabilities the DAV protocol engine depends on
//!
//! A resource is either a collection ([`DavCollection`]) or a file
//! ([`DavFile`]); both carry ownership and ACL information through
//! [`DavResource`].

use chrono::{DateTime, Utc};

use crate::acl::{AclEntry, Privilege};
use crate::error::{DavError, DavResult};
use crate::property::{PropPatch, Properties, PropertyName};

/// Behaviour shared by every DAV node
pub trait DavResource: Send + Sync {
    /// Path segment of the node inside its parent
    fn name(&self) -> String;

    /// Rename the node
    fn set_name(&self, name: &str) -> DavResult<()>;

    /// Remove the node
    fn delete(&self) -> DavResult<()>;

    /// Time of the last modification
    fn last_modified(&self) -> DavResult<DateTime<Utc>>;

    /// Principal URI of the owner
    fn owner(&self) -> &str;

    /// Group principal, if any
    fn group(&self) -> Option<&str> {
        None
    }

    /// Access control list of the node
    fn acl(&self) -> Vec<AclEntry>;

    /// Replace the ACL
    fn set_acl(&self, _acl: &[AclEntry]) -> DavResult<()> {
        Err(DavError::Forbidden(
            "Setting ACL is not supported on this node".to_string(),
        ))
    }

    /// Privileges the node supports; `None` means the engine's default set
    fn supported_privilege_set(&self) -> Option<Vec<Privilege>> {
        None
    }
}

/// A single file resource, such as one vCard
pub trait DavFile: DavResource {
    /// Body of the resource
    fn get(&self) -> DavResult<Vec<u8>>;

    /// Replace the body, returning the new ETag
    fn put(&self, data: &[u8]) -> DavResult<String>;

    fn content_type(&self) -> Option<String>;

    /// Quoted entity tag
    fn etag(&self) -> Option<String>;

    fn size(&self) -> DavResult<u64>;
}

/// A collection of child resources
pub trait DavCollection: DavResource {
    /// Create a new file in the collection
    fn create_child(&self, name: &str, data: Option<&[u8]>) -> DavResult<()>;

    /// Look up one child by name
    fn get_child(&self, name: &str) -> DavResult<Box<dyn DavFile>>;

    /// All children of the collection
    fn list_children(&self) -> DavResult<Vec<Box<dyn DavFile>>>;

    /// Whether a child with this name exists
    fn exists(&self, name: &str) -> DavResult<bool>;

    /// Apply a PROPPATCH
    fn update_properties(&self, patch: &PropPatch) -> DavResult<()>;

    /// Properties of the collection.
    ///
    /// Implementations may return more than was requested; callers that
    /// need only the requested set intersect the result themselves.
    fn properties(&self, requested: &[PropertyName]) -> DavResult<Properties>;
}
