//! ci-carddav: read-only "Recently contacted" CardDAV address book
//!
//! This crate adapts the recent contact store to the collection and
//! file capabilities a DAV protocol engine works with.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ci_carddav::{AddressBookProvider, DavCollection, RecentContactsProvider};
//!
//! let provider = RecentContactsProvider::new(store, l10n, "contactsinteraction");
//! for book in provider.fetch_all_for_address_book_home("principals/users/alice") {
//!     for card in book.list_children()? {
//!         println!("{} {}", card.name(), card.etag());
//!     }
//! }
//! ```

pub mod acl;
pub mod address_book;
pub mod app_generated;
pub mod card;
pub mod error;
pub mod node;
pub mod property;
pub mod provider;

pub use acl::{AclEntry, AclPolicy, Privilege};
pub use address_book::RecentAddressBook;
pub use card::Card;
pub use error::{DavError, DavResult};
pub use node::{DavCollection, DavFile, DavResource};
pub use property::{PropPatch, Properties, PropertyName, PropertyValue};
pub use provider::{AddressBookProvider, RecentContactsProvider};
