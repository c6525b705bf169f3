//! Recording of contact interactions
//!
//! Whenever a user interacts with someone (shares a file, sends a
//! message, ...) the host raises a [`ContactInteraction`]. The recorder
//! refreshes matching recent contacts or stores a new one with a
//! generated card.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::l10n::L10n;
use crate::recent::{NewRecentContact, RecentContact, RecentContactStore};
use crate::vcard::{self, CardProperties};
use crate::Result;

/// An interaction between a user and another person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInteraction {
    /// User who initiated the interaction
    pub actor: String,
    /// Local user id of the other party
    #[serde(default)]
    pub uid: Option<String>,
    /// Email address of the other party
    #[serde(default)]
    pub email: Option<String>,
    /// Federated cloud id of the other party
    #[serde(default)]
    pub federated_cloud_id: Option<String>,
}

impl ContactInteraction {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            ..Default::default()
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
    /// Copy with empty identifiers treated as absent
    fn without_empty_identifiers(&self) -> Self {
        let present = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        Self {
            actor: self.actor.clone(),
            uid: present(&self.uid),
            email: present(&self.email),
            federated_cloud_id: present(&self.federated_cloud_id),
        }
    }
}

/// Why an interaction was not recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Neither uid, email nor cloud id was given
    NoIdentifier,
    /// The actor interacted with themself
    SelfContact,
}

/// Result of recording an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Ignored(IgnoreReason),
    /// Number of existing records whose last contact was refreshed
    Updated(usize),
    Created(RecentContact),
}

/// Writes interactions into the recent contact store
pub struct InteractionRecorder {
    store: Arc<dyn RecentContactStore>,
    l10n: Arc<dyn L10n>,
}

impl InteractionRecorder {
    pub fn new(store: Arc<dyn RecentContactStore>, l10n: Arc<dyn L10n>) -> Self {
        Self { store, l10n }
    }

    /// Record one interaction
    pub fn record(&self, interaction: &ContactInteraction) -> Result<RecordOutcome> {
        let interaction = &interaction.without_empty_identifiers();
        let uid = interaction.uid.as_deref();
        let email = interaction.email.as_deref();
        let cloud_id = interaction.federated_cloud_id.as_deref();

        if uid.is_none() && email.is_none() && cloud_id.is_none() {
            warn!(actor = %interaction.actor, "Contact interaction event has no user identifier set");
            return Ok(RecordOutcome::Ignored(IgnoreReason::NoIdentifier));
        }
        if uid == Some(interaction.actor.as_str()) {
            info!(actor = %interaction.actor, "Ignoring contact interaction with self");
            return Ok(RecordOutcome::Ignored(IgnoreReason::SelfContact));
        }

        let existing = self
            .store
            .find_match(&interaction.actor, uid, email, cloud_id)?;
        if !existing.is_empty() {
            let now = Utc::now();
            for contact in &existing {
                self.store.touch(contact.id, now)?;
            }
            debug!(actor = %interaction.actor, "Refreshed {} recent contacts", existing.len());
            return Ok(RecordOutcome::Updated(existing.len()));
        }

        let mut contact = NewRecentContact::new(&interaction.actor);
        contact.uid = interaction.uid.clone();
        contact.email = interaction.email.clone();
        contact.federated_cloud_id = interaction.federated_cloud_id.clone();
        contact.card = self.generate_card(interaction);

        let stored = self.store.insert(&contact)?;
        info!(actor = %interaction.actor, id = stored.id, "Recorded new recent contact");
        Ok(RecordOutcome::Created(stored))
    }

    fn generate_card(&self, interaction: &ContactInteraction) -> String {
        let full_name = interaction
            .uid
            .as_deref()
            .or(interaction.email.as_deref())
            .or(interaction.federated_cloud_id.as_deref())
            .unwrap_or_default()
            .to_string();

        vcard::generate(&CardProperties {
            uid: uuid::Uuid::new_v4().to_string(),
            full_name,
            categories: Some(self.l10n.t("Recently contacted")),
            local_uid: interaction.uid.clone(),
            email: interaction.email.clone(),
            cloud_id: interaction.federated_cloud_id.clone(),
        })
    }
}
