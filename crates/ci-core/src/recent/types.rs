//! Recent contact types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vcard;

/// A stored recent contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentContact {
    /// Row id, unique per store
    pub id: i64,
    /// User who owns this record
    pub actor_uid: String,
    /// Local user id of the contacted person
    pub uid: Option<String>,
    /// Email address of the contacted person
    pub email: Option<String>,
    /// Federated cloud id of the contacted person
    pub federated_cloud_id: Option<String>,
    /// vCard text served to DAV clients
    pub card: String,
    /// Time of the latest interaction
    pub last_contact: DateTime<Utc>,
}

impl RecentContact {
    /// Formatted name from the card, if it has one
    pub fn display_name(&self) -> Option<String> {
        vcard::property(&self.card, "FN")
    }
}

/// A recent contact that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecentContact {
    pub actor_uid: String,
    pub uid: Option<String>,
    pub email: Option<String>,
    pub federated_cloud_id: Option<String>,
    pub card: String,
    pub last_contact: DateTime<Utc>,
}

impl NewRecentContact {
    /// Create a record for `actor_uid` contacted now
    pub fn new(actor_uid: impl Into<String>) -> Self {
        Self {
            actor_uid: actor_uid.into(),
            uid: None,
            email: None,
            federated_cloud_id: None,
            card: String::new(),
            last_contact: Utc::now(),
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_federated_cloud_id(mut self, cloud_id: impl Into<String>) -> Self {
        self.federated_cloud_id = Some(cloud_id.into());
        self
    }

    pub fn with_card(mut self, card: impl Into<String>) -> Self {
        self.card = card.into();
        self
    }

    pub fn with_last_contact(mut self, last_contact: DateTime<Utc>) -> Self {
        self.last_contact = last_contact;
        self
    }
}
