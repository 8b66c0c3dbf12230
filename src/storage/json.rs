use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::profiles::{Attachment, ProfileDraft};

use super::files::{read_json, sanitize_file_name, write_blob, write_json};
use super::{Card, GalleryPhoto, Profile, ProfilePatch, ProfileStore};

const PROFILES_FILE: &str = "profiles.json";
const CARDS_FILE: &str = "cards.json";
const GALLERY_FILE: &str = "gallery.json";
const GALLERY_BLOBS_DIR: &str = "gallery";

/// Keeps each collection in one pretty-printed JSON file under `root`.
///
/// Every call reloads from disk, so two handles on one directory observe
/// each other's writes.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    root: PathBuf,
}

impl JsonProfileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        Ok(read_json(self.root.join(file))?.unwrap_or_default())
    }

    fn persist<T: Serialize>(&self, file: &str, records: &[T]) -> Result<()> {
        let outcome = write_json(self.root.join(file), &records)?;
        debug!(path = ?outcome.path, hash = %outcome.hash, "store collection written");
        Ok(())
    }

    fn profiles(&self) -> Result<Vec<Profile>> {
        self.load(PROFILES_FILE)
    }

    fn cards(&self) -> Result<Vec<Card>> {
        self.load(CARDS_FILE)
    }

    fn gallery(&self) -> Result<Vec<GalleryPhoto>> {
        self.load(GALLERY_FILE)
    }

    fn blob_path(&self, profile_id: Uuid, photo_id: Uuid, file_name: &str) -> PathBuf {
        let safe_name = sanitize_file_name(file_name);
        self.root
            .join(GALLERY_BLOBS_DIR)
            .join(profile_id.to_string())
            .join(format!("{photo_id}-{safe_name}"))
    }
}

impl ProfileStore for JsonProfileStore {
    fn find_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        Ok(self
            .profiles()?
            .into_iter()
            .find(|profile| profile.username == username))
    }

    fn create_profile(&mut self, draft: &ProfileDraft) -> Result<Profile> {
        let mut profiles = self.profiles()?;
        let profile = Profile::from_draft(draft);
        if profile.username.is_empty() {
            bail!("Cannot create a profile without a name");
        }
        if profiles.iter().any(|p| p.username == profile.username) {
            bail!("Profile '{}' already exists", profile.username);
        }
        profiles.push(profile.clone());
        self.persist(PROFILES_FILE, &profiles)?;
        Ok(profile)
    }

    fn update_profile(&mut self, id: Uuid, patch: &ProfilePatch) -> Result<Profile> {
        let mut profiles = self.profiles()?;
        if let Some(name) = &patch.name {
            let username = crate::profiles::derive_username(name);
            if profiles.iter().any(|p| p.id != id && p.username == username) {
                bail!("Profile '{username}' already exists");
            }
        }
        let profile = profiles
            .iter_mut()
            .find(|profile| profile.id == id)
            .with_context(|| format!("Profile {id} not found"))?;
        profile.apply(patch);
        let updated = profile.clone();
        self.persist(PROFILES_FILE, &profiles)?;
        Ok(updated)
    }

    fn create_card(
        &mut self,
        profile_id: Uuid,
        card_text: &str,
        condensed_bio: &str,
    ) -> Result<Card> {
        if !self.profiles()?.iter().any(|p| p.id == profile_id) {
            bail!("Profile {profile_id} not found");
        }
        let mut cards = self.cards()?;
        let now = Utc::now();
        for card in cards
            .iter_mut()
            .filter(|card| card.profile_id == profile_id && card.is_active)
        {
            card.is_active = false;
            card.updated_at = now;
        }
        let card = Card {
            id: Uuid::new_v4(),
            profile_id,
            card_text: card_text.to_string(),
            condensed_bio: condensed_bio.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        cards.push(card.clone());
        self.persist(CARDS_FILE, &cards)?;
        Ok(card)
    }

    fn active_card(&self, profile_id: Uuid) -> Result<Option<Card>> {
        Ok(self
            .cards()?
            .into_iter()
            .filter(|card| card.profile_id == profile_id && card.is_active)
            .max_by_key(|card| card.created_at))
    }

    fn list_gallery_photos(&self, profile_id: Uuid) -> Result<Vec<GalleryPhoto>> {
        let mut photos: Vec<GalleryPhoto> = self
            .gallery()?
            .into_iter()
            .filter(|photo| photo.profile_id == profile_id)
            .collect();
        photos.sort_by_key(|photo| photo.display_order);
        Ok(photos)
    }

    fn add_gallery_photo(
        &mut self,
        profile_id: Uuid,
        photo: &Attachment,
        caption: &str,
        display_order: u32,
    ) -> Result<GalleryPhoto> {
        let mut gallery = self.gallery()?;
        let id = Uuid::new_v4();
        let photo_path = write_blob(
            self.blob_path(profile_id, id, &photo.file_name),
            &photo.bytes,
        )?;
        let record = GalleryPhoto {
            id,
            profile_id,
            photo_path,
            caption: caption.to_string(),
            display_order,
            created_at: Utc::now(),
        };
        gallery.push(record.clone());
        self.persist(GALLERY_FILE, &gallery)?;
        Ok(record)
    }

    fn delete_gallery_photo(&mut self, id: Uuid) -> Result<bool> {
        let mut gallery = self.gallery()?;
        let Some(index) = gallery.iter().position(|photo| photo.id == id) else {
            return Ok(false);
        };
        let removed = gallery.remove(index);
        self.persist(GALLERY_FILE, &gallery)?;
        if removed.photo_path.exists() {
            fs::remove_file(&removed.photo_path)
                .with_context(|| format!("Failed removing photo {:?}", removed.photo_path))?;
        }
        Ok(true)
    }
}
