//! Operator commands
//!
//! Each command writes its report to the given writer so the output can
//! be checked without a terminal.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use ci_carddav::{
    AddressBookProvider, DavCollection, DavError, DavFile, DavResource, RecentAddressBook,
    RecentContactsProvider,
};
use ci_core::{ContactInteraction, InteractionRecorder, L10n, RecentContactStore, RecordOutcome};
use ci_schedule::CleanupJob;

/// Shared handles every command works with
pub struct Context {
    pub store: Arc<dyn RecentContactStore>,
    pub l10n: Arc<dyn L10n>,
    pub app_id: String,
}

impl Context {
    fn address_book(&self, principal: &str) -> anyhow::Result<RecentAddressBook> {
        let provider = RecentContactsProvider::new(
            Arc::clone(&self.store),
            Arc::clone(&self.l10n),
            self.app_id.clone(),
        );
        provider
            .get_address_book_in_address_book_home(principal, RecentAddressBook::URI)
            .ok_or_else(|| anyhow::anyhow!("No recent contacts address book for {}", principal))
    }
}

/// One line per card: id, last contact, etag and display name
pub fn list(ctx: &Context, principal: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let book = ctx.address_book(principal)?;
    let cards = book.cards()?;

    writeln!(out, "{} ({} cards)", book.name(), cards.len())?;
    for card in &cards {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            card.name(),
            card.contact().last_contact.format("%Y-%m-%d %H:%M:%S"),
            card.etag().unwrap_or_default(),
            card.contact().display_name().unwrap_or_default(),
        )?;
    }
    Ok(())
}

/// Print the vCard of one child
pub fn show(ctx: &Context, principal: &str, name: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let book = ctx.address_book(principal)?;
    match book.get_child(name) {
        Ok(card) => out.write_all(&card.get()?)?,
        Err(e @ DavError::NotFound { .. }) => writeln!(out, "{}", e)?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Print the collection properties followed by its ACL
pub fn props(ctx: &Context, principal: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let book = ctx.address_book(principal)?;

    for (name, value) in book.properties(&[])? {
        writeln!(out, "{} = {}", name, value)?;
    }
    for entry in book.acl() {
        writeln!(
            out,
            "acl: {} {}{}",
            entry.privilege,
            entry.principal,
            if entry.protected { " (protected)" } else { "" }
        )?;
    }
    Ok(())
}

pub fn record(
    ctx: &Context,
    interaction: &ContactInteraction,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let recorder = InteractionRecorder::new(Arc::clone(&ctx.store), Arc::clone(&ctx.l10n));

    match recorder.record(interaction)? {
        RecordOutcome::Ignored(reason) => writeln!(out, "ignored: {:?}", reason)?,
        RecordOutcome::Updated(count) => writeln!(out, "updated {} recent contacts", count)?,
        RecordOutcome::Created(contact) => writeln!(out, "created recent contact {}", contact.id)?,
    }
    Ok(())
}

/// Run the cleanup job once
pub fn cleanup(job: &CleanupJob, out: &mut dyn Write) -> anyhow::Result<()> {
    let deleted = job.run(Utc::now())?;
    writeln!(
        out,
        "deleted {} recent contacts older than {} days",
        deleted,
        job.retention().num_days()
    )?;
    Ok(())
}
