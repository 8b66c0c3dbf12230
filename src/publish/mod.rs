//! Finalization: hand a validated draft to the profile store.

pub mod export;

pub use export::{export_card_bundle, ExportDescriptor};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::generation::GeneratedArtifacts;
use crate::profiles::ProfileDraft;
use crate::storage::{Card, GalleryPhoto, Profile, ProfilePatch, ProfileStore};

/// Everything written for one finalized draft.
#[derive(Debug, Clone)]
pub struct PublishedCard {
    pub profile: Profile,
    pub card: Card,
    pub photos: Vec<GalleryPhoto>,
    pub artifacts: GeneratedArtifacts,
    /// True when an existing profile was updated instead of created.
    pub updated_existing: bool,
}

/// Upserts the profile, stores a new active card and replaces the gallery
/// when the draft carries photos.
///
/// Returns `None` when the draft is incomplete or the store fails; store
/// failures are logged, not retried.
pub fn publish<S: ProfileStore>(store: &mut S, draft: &ProfileDraft) -> Option<PublishedCard> {
    let artifacts = match GeneratedArtifacts::try_from_draft(draft) {
        Ok(artifacts) => artifacts,
        Err(report) => {
            debug!(%report, "draft not publishable");
            return None;
        }
    };
    match try_publish(store, draft, artifacts) {
        Ok(published) => {
            info!(
                username = %published.profile.username,
                card_id = %published.card.id,
                photos = published.photos.len(),
                "card published"
            );
            Some(published)
        }
        Err(err) => {
            warn!(username = %draft.username(), error = %err, "publishing card failed");
            None
        }
    }
}

fn try_publish<S: ProfileStore>(
    store: &mut S,
    draft: &ProfileDraft,
    artifacts: GeneratedArtifacts,
) -> Result<PublishedCard> {
    let (profile, updated_existing) = match store.find_profile_by_username(&artifacts.username)? {
        Some(existing) => (
            store.update_profile(existing.id, &ProfilePatch::from_draft(draft))?,
            true,
        ),
        None => (store.create_profile(draft)?, false),
    };
    let card = store.create_card(profile.id, &artifacts.card_text, &artifacts.condensed_bio)?;
    let photos = replace_gallery(store, &profile, draft)?;
    Ok(PublishedCard {
        profile,
        card,
        photos,
        artifacts,
        updated_existing,
    })
}

/// Swaps in the draft's photos; a draft without photos keeps the stored
/// gallery. New photos are added before the old ones are removed.
fn replace_gallery<S: ProfileStore>(
    store: &mut S,
    profile: &Profile,
    draft: &ProfileDraft,
) -> Result<Vec<GalleryPhoto>> {
    let stale = store.list_gallery_photos(profile.id)?;
    if draft.photos().is_empty() {
        return Ok(stale);
    }
    let mut photos = Vec::with_capacity(draft.photos().len());
    for (order, attachment) in (0u32..).zip(draft.photos()) {
        let caption = format!("Portfolio {}", order + 1);
        photos.push(store.add_gallery_photo(profile.id, attachment, &caption, order)?);
    }
    for old in stale {
        store.delete_gallery_photo(old.id)?;
    }
    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::Attachment;
    use crate::storage::JsonProfileStore;
    use anyhow::bail;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn draft() -> ProfileDraft {
        ProfileDraft::sample()
    }

    struct FailingStore;

    impl ProfileStore for FailingStore {
        fn find_profile_by_username(&self, _username: &str) -> Result<Option<Profile>> {
            bail!("store offline")
        }
        fn create_profile(&mut self, _draft: &ProfileDraft) -> Result<Profile> {
            bail!("store offline")
        }
        fn update_profile(&mut self, _id: Uuid, _patch: &ProfilePatch) -> Result<Profile> {
            bail!("store offline")
        }
        fn create_card(&mut self, _: Uuid, _: &str, _: &str) -> Result<Card> {
            bail!("store offline")
        }
        fn active_card(&self, _profile_id: Uuid) -> Result<Option<Card>> {
            bail!("store offline")
        }
        fn list_gallery_photos(&self, _profile_id: Uuid) -> Result<Vec<GalleryPhoto>> {
            bail!("store offline")
        }
        fn add_gallery_photo(
            &mut self,
            _: Uuid,
            _: &Attachment,
            _: &str,
            _: u32,
        ) -> Result<GalleryPhoto> {
            bail!("store offline")
        }
        fn delete_gallery_photo(&mut self, _id: Uuid) -> Result<bool> {
            bail!("store offline")
        }
    }

    #[test]
    fn incomplete_drafts_are_not_published() -> Result<()> {
        let tmp = TempDir::new()?;
        let mut store = JsonProfileStore::new(tmp.path());
        let mut incomplete = draft();
        incomplete.whatsapp.clear();
        assert!(publish(&mut store, &incomplete).is_none());
        assert!(store.find_profile_by_username("janedoe")?.is_none());
        Ok(())
    }

    #[test]
    fn store_failures_surface_as_none() {
        assert!(publish(&mut FailingStore, &draft()).is_none());
    }

    #[test]
    fn republishing_updates_the_same_profile() -> Result<()> {
        let tmp = TempDir::new()?;
        let mut store = JsonProfileStore::new(tmp.path());
        let first = publish(&mut store, &draft()).expect("first publish");
        assert!(!first.updated_existing);

        let mut revised = draft();
        revised.city = "Penang".into();
        revised.push_photo(Attachment::new("a.jpg", "image/jpeg", vec![1, 2]));
        let second = publish(&mut store, &revised).expect("second publish");
        assert!(second.updated_existing);
        assert_eq!(second.profile.id, first.profile.id);
        assert_eq!(second.profile.city, "Penang");
        assert_eq!(second.photos.len(), 1);
        assert_eq!(second.photos[0].caption, "Portfolio 1");

        let active = store.active_card(first.profile.id)?.expect("active card");
        assert_eq!(active.id, second.card.id);
        assert!(active.card_text.contains("📍 **Penang**"));
        Ok(())
    }

    #[test]
    fn gallery_is_replaced_not_appended() -> Result<()> {
        let tmp = TempDir::new()?;
        let mut store = JsonProfileStore::new(tmp.path());
        let mut with_photos = draft();
        with_photos.push_photos(vec![
            Attachment::new("a.jpg", "image/jpeg", vec![1]),
            Attachment::new("b.jpg", "image/jpeg", vec![2]),
        ]);
        let published = publish(&mut store, &with_photos).expect("publish");

        let mut replacement = draft();
        replacement.push_photo(Attachment::new("c.jpg", "image/jpeg", vec![3]));
        let republished = publish(&mut store, &replacement).expect("republish");
        let gallery = store.list_gallery_photos(published.profile.id)?;
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery[0].id, republished.photos[0].id);
        assert_eq!(gallery[0].display_order, 0);
        Ok(())
    }

    #[test]
    fn republishing_without_photos_keeps_the_gallery() -> Result<()> {
        let tmp = TempDir::new()?;
        let mut store = JsonProfileStore::new(tmp.path());
        let mut with_photos = draft();
        with_photos.push_photos(vec![
            Attachment::new("a.jpg", "image/jpeg", vec![1]),
            Attachment::new("b.jpg", "image/jpeg", vec![2]),
        ]);
        let published = publish(&mut store, &with_photos).expect("publish");

        let republished = publish(&mut store, &draft()).expect("republish without photos");
        assert_eq!(republished.photos.len(), 2);
        let gallery = store.list_gallery_photos(published.profile.id)?;
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery[0].caption, "Portfolio 1");
        Ok(())
    }

    /// Delegates to a JSON store but rejects gallery additions.
    struct NoNewPhotos(JsonProfileStore);

    impl ProfileStore for NoNewPhotos {
        fn find_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
            self.0.find_profile_by_username(username)
        }
        fn create_profile(&mut self, draft: &ProfileDraft) -> Result<Profile> {
            self.0.create_profile(draft)
        }
        fn update_profile(&mut self, id: Uuid, patch: &ProfilePatch) -> Result<Profile> {
            self.0.update_profile(id, patch)
        }
        fn create_card(&mut self, profile_id: Uuid, text: &str, bio: &str) -> Result<Card> {
            self.0.create_card(profile_id, text, bio)
        }
        fn active_card(&self, profile_id: Uuid) -> Result<Option<Card>> {
            self.0.active_card(profile_id)
        }
        fn list_gallery_photos(&self, profile_id: Uuid) -> Result<Vec<GalleryPhoto>> {
            self.0.list_gallery_photos(profile_id)
        }
        fn add_gallery_photo(
            &mut self,
            _: Uuid,
            _: &Attachment,
            _: &str,
            _: u32,
        ) -> Result<GalleryPhoto> {
            bail!("disk full")
        }
        fn delete_gallery_photo(&mut self, id: Uuid) -> Result<bool> {
            self.0.delete_gallery_photo(id)
        }
    }

    #[test]
    fn failed_photo_upload_leaves_old_gallery_in_place() -> Result<()> {
        let tmp = TempDir::new()?;
        let mut store = JsonProfileStore::new(tmp.path());
        let mut with_photos = draft();
        with_photos.push_photo(Attachment::new("a.jpg", "image/jpeg", vec![1]));
        let published = publish(&mut store, &with_photos).expect("publish");

        let mut flaky = NoNewPhotos(store);
        let mut replacement = draft();
        replacement.push_photo(Attachment::new("b.jpg", "image/jpeg", vec![2]));
        assert!(publish(&mut flaky, &replacement).is_none());

        let gallery = flaky.0.list_gallery_photos(published.profile.id)?;
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery[0].id, published.photos[0].id);
        Ok(())
    }
}
