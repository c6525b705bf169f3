//! Access control entries (RFC 3744)

use std::fmt;

use serde::{Deserialize, Serialize};

/// A DAV privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Privilege {
    Read,
    Write,
    WriteProperties,
    WriteContent,
    All,
}

impl Privilege {
    /// Clark notation, e.g. `{DAV:}read`
    pub fn as_clark(&self) -> &'static str {
        match self {
            Privilege::Read => "{DAV:}read",
            Privilege::Write => "{DAV:}write",
            Privilege::WriteProperties => "{DAV:}write-properties",
            Privilege::WriteContent => "{DAV:}write-content",
            Privilege::All => "{DAV:}all",
        }
    }

    /// Whether holding `self` implies holding `other`
    pub fn implies(&self, other: Privilege) -> bool {
        match self {
            Privilege::All => true,
            Privilege::Write => matches!(
                other,
                Privilege::Write | Privilege::WriteProperties | Privilege::WriteContent
            ),
            _ => *self == other,
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_clark())
    }
}

/// One ACL rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub privilege: Privilege,
    pub principal: String,
    /// Protected entries cannot be changed through the DAV ACL method
    pub protected: bool,
}

impl AclEntry {
    /// Whether this entry grants `privilege` to `principal`
    pub fn grants(&self, principal: &str, privilege: Privilege) -> bool {
        self.principal == principal && self.privilege.implies(privilege)
    }
}

/// Rule for deriving a node's ACL from its owner.
///
/// Sharing beyond the owner is layered on by the host's ACL subsystem,
/// never by this policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclPolicy {
    privilege: Privilege,
    protected: bool,
}

impl AclPolicy {
    /// Owner may read, nothing else; the entry is protected
    pub fn owner_read_only() -> Self {
        Self {
            privilege: Privilege::Read,
            protected: true,
        }
    }

    /// The ACL for a node owned by `owner`
    pub fn entries_for(&self, owner: &str) -> Vec<AclEntry> {
        vec![AclEntry {
            privilege: self.privilege,
            principal: owner.to_string(),
            protected: self.protected,
        }]
    }
}

impl Default for AclPolicy {
    fn default() -> Self {
        Self::owner_read_only()
    }
}

/// Whether any entry of `acl` grants `privilege` to `principal`
pub fn is_granted(acl: &[AclEntry], principal: &str, privilege: Privilege) -> bool {
    acl.iter().any(|entry| entry.grants(principal, privilege))
}
