//! Recent contact storage implementation using SQLite

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use tracing::{debug, info};

use crate::recent::{NewRecentContact, RecentContact};
use crate::{Error, Result};

const COLUMNS: &str = "id, actor_uid, uid, email, federated_cloud_id, card, last_contact";

/// Storage for recent contacts, scoped by owning user
pub trait RecentContactStore: Send + Sync {
    /// Look up one record of `actor_uid`.
    ///
    /// Returns [`Error::DoesNotExist`] when no such record belongs to the actor.
    fn find(&self, actor_uid: &str, id: i64) -> Result<RecentContact>;

    /// All records of `actor_uid`, oldest id first
    fn find_all(&self, actor_uid: &str) -> Result<Vec<RecentContact>>;

    /// Records of `actor_uid` matching any of the given identifiers
    fn find_match(
        &self,
        actor_uid: &str,
        uid: Option<&str>,
        email: Option<&str>,
        federated_cloud_id: Option<&str>,
    ) -> Result<Vec<RecentContact>>;

    /// Store a new record and return it with its assigned id
    fn insert(&self, contact: &NewRecentContact) -> Result<RecentContact>;

    /// Move the last interaction time of a record
    fn touch(&self, id: i64, last_contact: DateTime<Utc>) -> Result<()>;

    /// Delete every record last contacted before `older_than`
    fn cleanup(&self, older_than: DateTime<Utc>) -> Result<usize>;
}

/// SQLite-based recent contact store
pub struct SqliteRecentContactStore {
    conn: Mutex<Connection>,
}

impl SqliteRecentContactStore {
    /// Open (or create) the database at `db_path`
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        debug!("Opening recent contacts database at: {}", db_path.display());

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_tables()?;
        info!("Recent contact store initialized");
        Ok(store)
    }

    /// Create an in-memory store (useful for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_tables()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| Error::Lock(e.to_string()))
    }

    fn init_tables(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS recent_contact (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                actor_uid TEXT NOT NULL,
                uid TEXT,
                email TEXT,
                federated_cloud_id TEXT,
                card TEXT NOT NULL,
                last_contact INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_recent_contact_actor_uid ON recent_contact(actor_uid)",
            [],
        )?;

        Ok(())
    }
}

fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<RecentContact> {
    let last_contact: i64 = row.get(6)?;
    let last_contact = DateTime::from_timestamp(last_contact, 0)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(6, last_contact))?;

    Ok(RecentContact {
        id: row.get(0)?,
        actor_uid: row.get(1)?,
        uid: row.get(2)?,
        email: row.get(3)?,
        federated_cloud_id: row.get(4)?,
        card: row.get(5)?,
        last_contact,
    })
}

impl RecentContactStore for SqliteRecentContactStore {
    fn find(&self, actor_uid: &str, id: i64) -> Result<RecentContact> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recent_contact WHERE actor_uid = ?1 AND id = ?2",
            COLUMNS
        ))?;

        match stmt.query_row(params![actor_uid, id], row_to_contact) {
            Ok(contact) => Ok(contact),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::DoesNotExist(format!(
                "no recent contact {} for user {}",
                id, actor_uid
            ))),
            Err(e) => Err(e.into()),
        }
    }

    fn find_all(&self, actor_uid: &str) -> Result<Vec<RecentContact>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recent_contact WHERE actor_uid = ?1 ORDER BY id ASC",
            COLUMNS
        ))?;

        let contacts = stmt
            .query_map(params![actor_uid], row_to_contact)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(actor_uid, "Found {} recent contacts", contacts.len());
        Ok(contacts)
    }

    fn find_match(
        &self,
        actor_uid: &str,
        uid: Option<&str>,
        email: Option<&str>,
        federated_cloud_id: Option<&str>,
    ) -> Result<Vec<RecentContact>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recent_contact
             WHERE actor_uid = ?1
               AND ((?2 IS NOT NULL AND uid = ?2)
                 OR (?3 IS NOT NULL AND email = ?3)
                 OR (?4 IS NOT NULL AND federated_cloud_id = ?4))
             ORDER BY id ASC",
            COLUMNS
        ))?;

        let contacts = stmt
            .query_map(params![actor_uid, uid, email, federated_cloud_id], row_to_contact)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(contacts)
    }

    fn insert(&self, contact: &NewRecentContact) -> Result<RecentContact> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO recent_contact (actor_uid, uid, email, federated_cloud_id, card, last_contact)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                contact.actor_uid,
                contact.uid,
                contact.email,
                contact.federated_cloud_id,
                contact.card,
                contact.last_contact.timestamp(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        debug!(actor_uid = %contact.actor_uid, id, "Inserted recent contact");

        // Stored at second precision
        let last_contact = DateTime::from_timestamp(contact.last_contact.timestamp(), 0)
            .unwrap_or(contact.last_contact);

        Ok(RecentContact {
            id,
            actor_uid: contact.actor_uid.clone(),
            uid: contact.uid.clone(),
            email: contact.email.clone(),
            federated_cloud_id: contact.federated_cloud_id.clone(),
            card: contact.card.clone(),
            last_contact,
        })
    }

    fn touch(&self, id: i64, last_contact: DateTime<Utc>) -> Result<()> {
        let conn = self.conn()?;
        let rows_affected = conn.execute(
            "UPDATE recent_contact SET last_contact = ?2 WHERE id = ?1",
            params![id, last_contact.timestamp()],
        )?;

        if rows_affected == 0 {
            return Err(Error::DoesNotExist(format!("no recent contact {}", id)));
        }
        Ok(())
    }

    fn cleanup(&self, older_than: DateTime<Utc>) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM recent_contact WHERE last_contact < ?1",
            params![older_than.timestamp()],
        )?;

        if deleted > 0 {
            info!(older_than = %older_than, "Deleted {} expired recent contacts", deleted);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn contact_for(actor: &str, email: &str) -> NewRecentContact {
        NewRecentContact::new(actor)
            .with_email(email)
            .with_card(format!("BEGIN:VCARD\r\nFN:{}\r\nEND:VCARD\r\n", email))
    }

    #[test]
    fn test_insert_and_find() -> Result<()> {
        let store = SqliteRecentContactStore::in_memory()?;

        let stored = store.insert(&contact_for("alice", "bob@example.com"))?;
        let loaded = store.find("alice", stored.id)?;

        assert_eq!(loaded, stored);
        assert_eq!(loaded.email.as_deref(), Some("bob@example.com"));
        Ok(())
    }

    #[test]
    fn test_find_missing() -> Result<()> {
        let store = SqliteRecentContactStore::in_memory()?;

        let err = store.find("alice", 42).unwrap_err();
        assert!(err.is_does_not_exist());
        Ok(())
    }

    #[test]
    fn test_find_is_scoped_to_actor() -> Result<()> {
        let store = SqliteRecentContactStore::in_memory()?;

        let stored = store.insert(&contact_for("alice", "bob@example.com"))?;
        let err = store.find("mallory", stored.id).unwrap_err();
        assert!(err.is_does_not_exist());
        Ok(())
    }

    #[test]
    fn test_find_all_in_insertion_order() -> Result<()> {
        let store = SqliteRecentContactStore::in_memory()?;

        let first = store.insert(&contact_for("alice", "one@example.com"))?;
        store.insert(&contact_for("bob", "other@example.com"))?;
        let second = store.insert(&contact_for("alice", "two@example.com"))?;

        let all = store.find_all("alice")?;
        let ids: Vec<i64> = all.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert!(all.iter().all(|c| c.actor_uid == "alice"));

        assert!(store.find_all("nobody")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_find_match() -> Result<()> {
        let store = SqliteRecentContactStore::in_memory()?;

        let by_uid = store.insert(&NewRecentContact::new("alice").with_uid("bob"))?;
        let by_email = store.insert(&contact_for("alice", "carol@example.com"))?;
        store.insert(&NewRecentContact::new("alice").with_federated_cloud_id("dave@remote"))?;
        store.insert(&NewRecentContact::new("erin").with_uid("bob"))?;

        let matches = store.find_match("alice", Some("bob"), None, None)?;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, by_uid.id);

        let matches = store.find_match("alice", Some("bob"), Some("carol@example.com"), None)?;
        let ids: Vec<i64> = matches.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![by_uid.id, by_email.id]);

        // absent identifiers never match NULL columns
        assert!(store.find_match("alice", None, None, None)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_touch() -> Result<()> {
        let store = SqliteRecentContactStore::in_memory()?;
        let stored = store.insert(&contact_for("alice", "bob@example.com"))?;

        let later = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
        store.touch(stored.id, later)?;

        assert_eq!(store.find("alice", stored.id)?.last_contact, later);
        assert!(store.touch(9999, later).unwrap_err().is_does_not_exist());
        Ok(())
    }

    #[test]
    fn test_cleanup() -> Result<()> {
        let store = SqliteRecentContactStore::in_memory()?;
        let now = Utc::now();

        store.insert(&contact_for("alice", "old@example.com").with_last_contact(now - Duration::days(30)))?;
        let fresh = store.insert(&contact_for("alice", "new@example.com").with_last_contact(now))?;

        let deleted = store.cleanup(now - Duration::days(7))?;
        assert_eq!(deleted, 1);

        let remaining = store.find_all("alice")?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, fresh.id);
        Ok(())
    }

    #[test]
    fn test_open_file_backed() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("recent.db");

        let id = {
            let store = SqliteRecentContactStore::open(&path)?;
            store.insert(&contact_for("alice", "bob@example.com"))?.id
        };

        let reopened = SqliteRecentContactStore::open(&path)?;
        assert_eq!(reopened.find("alice", id)?.email.as_deref(), Some("bob@example.com"));
        Ok(())
    }

    #[test]
    fn test_poisoned_lock() -> Result<()> {
        let store = SqliteRecentContactStore::in_memory()?;
        store.insert(&contact_for("alice", "bob@example.com"))?;

        std::thread::scope(|s| {
            let holder = s.spawn(|| {
                let _guard = store.conn.lock().unwrap();
                panic!("writer died while holding the connection");
            });
            assert!(holder.join().is_err());
        });

        assert!(matches!(store.find_all("alice"), Err(Error::Lock(_))));
        assert!(matches!(store.find("alice", 1), Err(Error::Lock(_))));
        Ok(())
    }
}
