//! A single recent contact exposed as a vCard resource

use chrono::{DateTime, Utc};
use ci_core::RecentContact;
use sha2::{Digest, Sha256};

use crate::acl::AclEntry;
use crate::error::{DavError, DavResult};
use crate::node::{DavFile, DavResource};

const CONTENT_TYPE: &str = "text/vcard; charset=utf-8";

/// Read-only view over one recent contact
#[derive(Debug, Clone)]
pub struct Card {
    contact: RecentContact,
    principal_uri: String,
    acl: Vec<AclEntry>,
}

impl Card {
    pub fn new(contact: RecentContact, principal_uri: impl Into<String>, acl: Vec<AclEntry>) -> Self {
        Self {
            contact,
            principal_uri: principal_uri.into(),
            acl,
        }
    }

    /// Record id of the underlying contact
    pub fn id(&self) -> i64 {
        self.contact.id
    }

    /// The underlying record
    pub fn contact(&self) -> &RecentContact {
        &self.contact
    }
}

impl DavResource for Card {
    fn name(&self) -> String {
        self.contact.id.to_string()
    }

    fn set_name(&self, _name: &str) -> DavResult<()> {
        Err(DavError::NotImplemented("Contacts cannot be renamed".to_string()))
    }

    fn delete(&self) -> DavResult<()> {
        Err(DavError::NotImplemented("Contacts cannot be deleted".to_string()))
    }

    fn last_modified(&self) -> DavResult<DateTime<Utc>> {
        Ok(self.contact.last_contact)
    }

    fn owner(&self) -> &str {
        &self.principal_uri
    }

    fn acl(&self) -> Vec<AclEntry> {
        self.acl.clone()
    }
}

impl DavFile for Card {
    fn get(&self) -> DavResult<Vec<u8>> {
        Ok(self.contact.card.as_bytes().to_vec())
    }

    fn put(&self, _data: &[u8]) -> DavResult<String> {
        Err(DavError::NotImplemented("Contacts are read-only".to_string()))
    }

    fn content_type(&self) -> Option<String> {
        Some(CONTENT_TYPE.to_string())
    }

    fn etag(&self) -> Option<String> {
        let digest = Sha256::digest(self.contact.last_contact.timestamp().to_string().as_bytes());
        Some(format!("\"{}\"", hex::encode(digest)))
    }

    fn size(&self) -> DavResult<u64> {
        Ok(self.contact.card.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acl::AclPolicy;
    use chrono::TimeZone;

    fn card_at(last_contact: DateTime<Utc>) -> Card {
        let contact = RecentContact {
            id: 3,
            actor_uid: "alice".to_string(),
            uid: Some("bob".to_string()),
            email: None,
            federated_cloud_id: None,
            card: "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:bob\r\nEND:VCARD\r\n".to_string(),
            last_contact,
        };
        let owner = "principals/users/alice";
        Card::new(contact, owner, AclPolicy::owner_read_only().entries_for(owner))
    }

    #[test]
    fn test_card_surface() {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let card = card_at(when);

        assert_eq!(card.name(), "3");
        assert_eq!(card.id(), 3);
        assert_eq!(card.owner(), "principals/users/alice");
        assert_eq!(card.content_type().as_deref(), Some("text/vcard; charset=utf-8"));
        assert_eq!(card.last_modified().unwrap(), when);
        assert_eq!(card.get().unwrap(), card.contact().card.as_bytes());
        assert_eq!(card.size().unwrap(), card.contact().card.len() as u64);
        assert_eq!(card.acl().len(), 1);
        assert!(card.group().is_none());
    }

    #[test]
    fn test_etag_follows_last_contact() {
        let first = card_at(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());
        let same = card_at(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());
        let later = card_at(Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap());

        let etag = first.etag().unwrap();
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag.len(), 66);
        assert_eq!(Some(etag.clone()), same.etag());
        assert_ne!(Some(etag), later.etag());
    }

    #[test]
    fn test_writes_are_rejected() {
        let card = card_at(Utc::now());

        assert!(matches!(card.put(b"BEGIN:VCARD"), Err(DavError::NotImplemented(_))));
        assert!(matches!(card.delete(), Err(DavError::NotImplemented(_))));
        assert!(matches!(card.set_name("4"), Err(DavError::NotImplemented(_))));
        assert!(matches!(card.set_acl(&[]), Err(DavError::Forbidden(_))));
    }
}
