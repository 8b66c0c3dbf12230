mod config;

pub use config::{
    ensure_workspace_structure, load_or_default, save, workspace_root, AppConfig,
    InterviewSettings, RelaySettings, WorkspacePaths, CONFIG_FILE_NAME,
};

use anyhow::{bail, Context, Result};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

use crate::events::{EventLog, EventType};
use crate::form::FormCollector;
use crate::generation::GeneratedArtifacts;
use crate::interview::{DelaySchedule, InterviewSession, TypingDelay};
use crate::microsite::{render_microsite_html, MicrositeView};
use crate::profiles::{Attachment, ProfileDraft};
use crate::publish::{export_card_bundle, publish, ExportDescriptor, PublishedCard};
use crate::relay::{handle_webhook, MessageSender, RelayOutcome};
use crate::storage::{JsonProfileStore, ProfileStore};

/// One installation: configuration, profile store and event log together.
pub struct CardWorkspace {
    pub config: AppConfig,
    pub paths: WorkspacePaths,
    store: JsonProfileStore,
    events: EventLog,
}

impl CardWorkspace {
    /// Opens the workspace under `AGENTOS_HOME` (or the OS default).
    pub fn open() -> Result<Self> {
        let paths = ensure_workspace_structure()?;
        Self::from_paths(paths)
    }

    pub fn open_at<P: AsRef<Path>>(root: P) -> Result<Self> {
        let paths = WorkspacePaths::new(root);
        paths.ensure()?;
        Self::from_paths(paths)
    }

    fn from_paths(paths: WorkspacePaths) -> Result<Self> {
        let config = load_or_default(&paths)?;
        Ok(Self {
            store: JsonProfileStore::new(&paths.store_dir),
            events: EventLog::for_workspace(&paths),
            config,
            paths,
        })
    }

    pub fn store(&self) -> &JsonProfileStore {
        &self.store
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// New interview paced by the configured delays and logging to the
    /// workspace event log.
    pub fn interview<D: TypingDelay>(&self, delay: D) -> InterviewSession<D> {
        let schedule = DelaySchedule::from(&self.config.interview);
        InterviewSession::new(schedule, delay).with_event_log(self.events.clone())
    }

    pub fn form(&self) -> FormCollector {
        FormCollector::new()
    }

    /// Publishes a finalized draft. `session_id` ties the audit event to
    /// the interview that produced it; form submissions pass `None`.
    pub fn publish(
        &mut self,
        draft: &ProfileDraft,
        session_id: Option<Uuid>,
    ) -> Option<PublishedCard> {
        let published = publish(&mut self.store, draft)?;
        self.record(
            session_id.unwrap_or_else(Uuid::new_v4),
            EventType::ProfilePublished,
            json!({
                "username": published.profile.username,
                "profile_id": published.profile.id,
                "card_id": published.card.id,
                "photos": published.photos.len(),
                "updated_existing": published.updated_existing,
            }),
        );
        Some(published)
    }

    /// Microsite HTML for a stored username. With `allow_demo`, unknown
    /// usernames render the demo profile instead of failing.
    pub fn microsite_html(&self, username: &str, allow_demo: bool) -> Result<String> {
        let view = match self.store.find_profile_by_username(username)? {
            Some(profile) => {
                let gallery = self.store.list_gallery_photos(profile.id)?;
                let card = self.store.active_card(profile.id)?;
                MicrositeView::from_records(&profile, &gallery, card.as_ref())
            }
            None if allow_demo => MicrositeView::demo(username),
            None => bail!("No published profile for username {username}"),
        };
        Ok(render_microsite_html(&view))
    }

    /// Bundles the active card and gallery of `username` into a zip.
    pub fn export_card(
        &self,
        username: &str,
        destination: Option<PathBuf>,
    ) -> Result<ExportDescriptor> {
        let profile = self
            .store
            .find_profile_by_username(username)?
            .with_context(|| format!("No published profile for username {username}"))?;
        let card = self
            .store
            .active_card(profile.id)?
            .with_context(|| format!("Profile {username} has no active card"))?;
        let mut photos = Vec::new();
        for photo in self.store.list_gallery_photos(profile.id)? {
            photos.push(Attachment::from_path(&photo.photo_path)?);
        }
        let artifacts = GeneratedArtifacts {
            username: profile.username.clone(),
            card_text: card.card_text,
            condensed_bio: card.condensed_bio,
        };
        let destination = destination.unwrap_or_else(|| self.paths.export_path(username));
        let descriptor = export_card_bundle(&artifacts, &photos, &destination)?;
        info!(
            username,
            path = %descriptor.path.display(),
            size_bytes = descriptor.size_bytes,
            "card exported"
        );
        self.record(
            descriptor.bundle_id,
            EventType::CardExported,
            json!({
                "username": descriptor.username,
                "path": descriptor.path,
                "entries": descriptor.entries,
                "checksum": descriptor.checksum,
            }),
        );
        Ok(descriptor)
    }

    /// Handles one webhook body and records the forward when a reply went out.
    pub fn relay<S: MessageSender + ?Sized>(&self, sender: &S, raw_body: &str) -> RelayOutcome {
        let outcome = handle_webhook(sender, raw_body);
        if let Some(reply) = &outcome.reply {
            self.record(
                Uuid::new_v4(),
                EventType::RelayForwarded,
                json!({ "chat_id": reply.chat_id, "delivered": outcome.delivered }),
            );
        }
        outcome
    }

    fn record(&self, session_id: Uuid, event_type: EventType, details: serde_json::Value) {
        if let Err(err) = self.events.record(session_id, event_type, details) {
            warn!(error = %err, ?event_type, "failed to record workspace event");
        }
    }
}
