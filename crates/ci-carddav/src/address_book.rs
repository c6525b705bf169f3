//! The "Recently contacted" address book
//!
//! A virtual, read-only collection built per request for one principal.
//! Its children are the principal's recent contacts; every write is
//! rejected.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ci_core::{principal, Error, L10n, RecentContactStore};
use tracing::debug;

use crate::acl::{AclEntry, AclPolicy};
use crate::app_generated;
use crate::card::Card;
use crate::error::{DavError, DavResult};
use crate::node::{DavCollection, DavFile, DavResource};
use crate::property::{self, PropPatch, Properties, PropertyName, PropertyValue};

/// Address book of the contacts a user recently interacted with
pub struct RecentAddressBook {
    store: Arc<dyn RecentContactStore>,
    l10n: Arc<dyn L10n>,
    app_id: String,
    principal_uri: String,
    acl_policy: AclPolicy,
}

impl RecentAddressBook {
    /// URI of the address book inside a principal's address book home
    pub const URI: &'static str = "recent";

    pub fn new(
        store: Arc<dyn RecentContactStore>,
        l10n: Arc<dyn L10n>,
        app_id: impl Into<String>,
        principal_uri: impl Into<String>,
        acl_policy: AclPolicy,
    ) -> Self {
        Self {
            store,
            l10n,
            app_id: app_id.into(),
            principal_uri: principal_uri.into(),
            acl_policy,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn uri(&self) -> &'static str {
        Self::URI
    }

    /// Look up a child, keeping the concrete card type
    pub fn card(&self, name: &str) -> DavResult<Card> {
        let uid = self.uid()?;
        let Some(id) = parse_card_id(name) else {
            debug!(name, "Rejecting card name that is not a contact id");
            return Err(not_found(Error::Other(format!("invalid card name {:?}", name))));
        };

        match self.store.find(uid, id) {
            Ok(contact) => Ok(Card::new(contact, &self.principal_uri, self.acl())),
            Err(e) if e.is_does_not_exist() => Err(not_found(e)),
            Err(e) => Err(e.into()),
        }
    }

    /// All children, keeping the concrete card type
    pub fn cards(&self) -> DavResult<Vec<Card>> {
        let acl = self.acl();
        let cards = self
            .store
            .find_all(self.uid()?)?
            .into_iter()
            .map(|contact| Card::new(contact, &self.principal_uri, acl.clone()))
            .collect();
        Ok(cards)
    }

    fn uid(&self) -> DavResult<&str> {
        Ok(principal::user_id(&self.principal_uri)?)
    }
}

/// Card names are the decimal ids of the records
fn parse_card_id(name: &str) -> Option<i64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

fn not_found(source: Error) -> DavError {
    DavError::NotFound {
        message: format!("Contact does not exist: {}", source),
        source,
    }
}

impl DavResource for RecentAddressBook {
    fn name(&self) -> String {
        app_generated::fully_qualified_name(&self.app_id, Self::URI)
    }

    fn set_name(&self, _name: &str) -> DavResult<()> {
        Err(DavError::MethodNotAllowed(
            "Renaming app-generated address books is not supported".to_string(),
        ))
    }

    fn delete(&self) -> DavResult<()> {
        Err(DavError::Immutable)
    }

    fn last_modified(&self) -> DavResult<DateTime<Utc>> {
        Err(DavError::NotImplemented("getLastModified".to_string()))
    }

    fn owner(&self) -> &str {
        &self.principal_uri
    }

    fn acl(&self) -> Vec<AclEntry> {
        self.acl_policy.entries_for(self.owner())
    }
}

impl DavCollection for RecentAddressBook {
    fn create_child(&self, _name: &str, _data: Option<&[u8]>) -> DavResult<()> {
        Err(DavError::Immutable)
    }

    fn get_child(&self, name: &str) -> DavResult<Box<dyn DavFile>> {
        Ok(Box::new(self.card(name)?))
    }

    fn list_children(&self) -> DavResult<Vec<Box<dyn DavFile>>> {
        Ok(self
            .cards()?
            .into_iter()
            .map(|card| Box::new(card) as Box<dyn DavFile>)
            .collect())
    }

    fn exists(&self, name: &str) -> DavResult<bool> {
        match self.card(name) {
            Ok(_) => Ok(true),
            Err(DavError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn update_properties(&self, _patch: &PropPatch) -> DavResult<()> {
        Err(DavError::Immutable)
    }

    fn properties(&self, _requested: &[PropertyName]) -> DavResult<Properties> {
        let mut props = Properties::new();
        props.insert(
            property::PRINCIPAL_URI,
            PropertyValue::Href(self.principal_uri.clone()),
        );
        props.insert(
            property::DISPLAY_NAME,
            PropertyValue::Text(self.l10n.t("Recently contacted")),
        );
        props.insert(property::READ_ONLY, PropertyValue::Bool(true));
        Ok(props)
    }
}
