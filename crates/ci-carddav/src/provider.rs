//! Registration of the recent contacts address book with the host
//!
//! The host asks every provider for the address books it contributes to
//! a principal's address book home.

use std::sync::Arc;

use ci_core::{L10n, RecentContactStore};
use tracing::debug;

use crate::acl::AclPolicy;
use crate::address_book::RecentAddressBook;
use crate::app_generated;

/// Source of app-generated address books
pub trait AddressBookProvider: Send + Sync {
    type AddressBook;

    /// Application id the address books are registered under
    fn app_id(&self) -> &str;

    /// Every address book this provider offers to `principal_uri`
    fn fetch_all_for_address_book_home(&self, principal_uri: &str) -> Vec<Self::AddressBook>;

    fn has_address_book_in_address_book_home(&self, principal_uri: &str, uri: &str) -> bool;

    fn get_address_book_in_address_book_home(
        &self,
        principal_uri: &str,
        uri: &str,
    ) -> Option<Self::AddressBook>;

    /// Resolve a fully qualified collection name to one of this provider's books
    fn resolve(&self, principal_uri: &str, name: &str) -> Option<Self::AddressBook> {
        let (app_id, uri) = app_generated::split_fully_qualified_name(name).ok()?;
        if app_id != self.app_id() {
            return None;
        }
        self.get_address_book_in_address_book_home(principal_uri, uri)
    }
}

/// Provides the single "recent" address book to every principal
pub struct RecentContactsProvider {
    store: Arc<dyn RecentContactStore>,
    l10n: Arc<dyn L10n>,
    app_id: String,
}

impl RecentContactsProvider {
    pub fn new(
        store: Arc<dyn RecentContactStore>,
        l10n: Arc<dyn L10n>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            l10n,
            app_id: app_id.into(),
        }
    }

    fn address_book(&self, principal_uri: &str) -> RecentAddressBook {
        debug!(principal_uri, "Building recent contacts address book");
        RecentAddressBook::new(
            Arc::clone(&self.store),
            Arc::clone(&self.l10n),
            self.app_id.clone(),
            principal_uri,
            AclPolicy::owner_read_only(),
        )
    }
}

impl AddressBookProvider for RecentContactsProvider {
    type AddressBook = RecentAddressBook;

    fn app_id(&self) -> &str {
        &self.app_id
    }

    fn fetch_all_for_address_book_home(&self, principal_uri: &str) -> Vec<RecentAddressBook> {
        vec![self.address_book(principal_uri)]
    }

    fn has_address_book_in_address_book_home(&self, _principal_uri: &str, uri: &str) -> bool {
        uri == RecentAddressBook::URI
    }

    fn get_address_book_in_address_book_home(
        &self,
        principal_uri: &str,
        uri: &str,
    ) -> Option<RecentAddressBook> {
        if uri != RecentAddressBook::URI {
            return None;
        }
        Some(self.address_book(principal_uri))
    }
}
