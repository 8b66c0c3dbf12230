//! Persistence contract for published profiles, cards and gallery photos.
//!
//! The collectors never talk to storage directly; `publish` is the only
//! caller on the write side and the microsite renderer on the read side.
//! `JsonProfileStore` is the bundled file-backed implementation.

pub mod files;
mod json;

pub use json::JsonProfileStore;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::profiles::{derive_username, Attachment, ProfileDraft};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub role: String,
    pub city: String,
    pub availability: String,
    pub whatsapp: String,
    pub bio: String,
    #[serde(default)]
    pub services: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn from_draft(draft: &ProfileDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: draft.username(),
            name: draft.name.clone(),
            role: draft.role.clone(),
            city: draft.city.clone(),
            availability: draft.availability.clone(),
            whatsapp: draft.whatsapp.clone(),
            bio: draft.bio.clone(),
            services: draft.services.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the set fields of `patch`; the username tracks the name.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
            self.username = derive_username(name);
        }
        if let Some(role) = &patch.role {
            self.role = role.clone();
        }
        if let Some(city) = &patch.city {
            self.city = city.clone();
        }
        if let Some(availability) = &patch.availability {
            self.availability = availability.clone();
        }
        if let Some(whatsapp) = &patch.whatsapp {
            self.whatsapp = whatsapp.clone();
        }
        if let Some(bio) = &patch.bio {
            self.bio = bio.clone();
        }
        if let Some(services) = &patch.services {
            self.services = services.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub city: Option<String>,
    pub availability: Option<String>,
    pub whatsapp: Option<String>,
    pub bio: Option<String>,
    pub services: Option<Vec<String>>,
}

impl ProfilePatch {
    pub fn from_draft(draft: &ProfileDraft) -> Self {
        Self {
            name: Some(draft.name.clone()),
            role: Some(draft.role.clone()),
            city: Some(draft.city.clone()),
            availability: Some(draft.availability.clone()),
            whatsapp: Some(draft.whatsapp.clone()),
            bio: Some(draft.bio.clone()),
            services: Some(draft.services.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub card_text: String,
    pub condensed_bio: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub photo_path: PathBuf,
    #[serde(default)]
    pub caption: String,
    pub display_order: u32,
    pub created_at: DateTime<Utc>,
}

/// Profile, card and gallery persistence.
pub trait ProfileStore {
    fn find_profile_by_username(&self, username: &str) -> Result<Option<Profile>>;

    /// Fails when a profile with the same username already exists.
    fn create_profile(&mut self, draft: &ProfileDraft) -> Result<Profile>;

    fn update_profile(&mut self, id: Uuid, patch: &ProfilePatch) -> Result<Profile>;

    /// Stores a new active card and deactivates every earlier card of the
    /// same profile.
    fn create_card(
        &mut self,
        profile_id: Uuid,
        card_text: &str,
        condensed_bio: &str,
    ) -> Result<Card>;

    fn active_card(&self, profile_id: Uuid) -> Result<Option<Card>>;

    /// Photos ordered by `display_order`.
    fn list_gallery_photos(&self, profile_id: Uuid) -> Result<Vec<GalleryPhoto>>;

    fn add_gallery_photo(
        &mut self,
        profile_id: Uuid,
        photo: &Attachment,
        caption: &str,
        display_order: u32,
    ) -> Result<GalleryPhoto>;

    /// Returns whether a photo was removed.
    fn delete_gallery_photo(&mut self, id: Uuid) -> Result<bool>;
}
