//! Data structures backing a card profile while it is being collected.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::validation::{ProfileField, ValidationReport};

/// Maximum number of gallery photos attached to one draft.
pub const MAX_PHOTOS: usize = 3;
/// Domain under which every microsite is published.
pub const MICROSITE_DOMAIN: &str = "agentos.my.id";

/// Opaque photo blob. The core never looks inside `bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Loads a file from disk, guessing the media type from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed reading attachment {:?}", path))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("Attachment path {:?} has no file name", path))?;
        let media_type = media_type_for(&file_name);
        Ok(Self {
            file_name,
            media_type: media_type.into(),
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

fn media_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

/// In-progress identity card record.
///
/// Scalar fields are public because collectors write them one at a time.
/// Photos are private so the `MAX_PHOTOS` cap cannot be bypassed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub role: String,
    pub city: String,
    pub availability: String,
    pub whatsapp: String,
    pub bio: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(skip)]
    photos: Vec<Attachment>,
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Microsite handle, always derived from the current `name`.
    pub fn username(&self) -> String {
        derive_username(&self.name)
    }

    pub fn microsite_address(&self) -> String {
        format!("{}.{}", self.username(), MICROSITE_DOMAIN)
    }

    /// In-app route of the microsite view.
    pub fn microsite_path(&self) -> String {
        format!("/microsite/{}", self.username())
    }

    pub fn set_services_from(&mut self, raw: &str) {
        self.services = parse_services(raw);
    }

    /// True when at least one service entry is non-blank.
    pub fn has_services(&self) -> bool {
        self.services.iter().any(|service| !service.trim().is_empty())
    }

    /// Non-blank services joined by ", ".
    pub fn services_line(&self) -> String {
        self.services
            .iter()
            .map(|service| service.trim())
            .filter(|service| !service.is_empty())
            .collect::<Vec<&str>>()
            .join(", ")
    }

    pub fn photos(&self) -> &[Attachment] {
        &self.photos
    }

    pub fn push_photo(&mut self, photo: Attachment) {
        self.push_photos(std::iter::once(photo));
    }

    /// Appends photos and keeps only the first `MAX_PHOTOS`.
    pub fn push_photos<I>(&mut self, photos: I)
    where
        I: IntoIterator<Item = Attachment>,
    {
        self.photos.extend(photos);
        self.photos.truncate(MAX_PHOTOS);
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<Attachment> {
        if index < self.photos.len() {
            Some(self.photos.remove(index))
        } else {
            None
        }
    }

    pub fn field(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Name => Some(&self.name),
            ProfileField::Role => Some(&self.role),
            ProfileField::City => Some(&self.city),
            ProfileField::Availability => Some(&self.availability),
            ProfileField::Whatsapp => Some(&self.whatsapp),
            ProfileField::Bio => Some(&self.bio),
            ProfileField::Services => None,
        }
    }

    /// Writes a scalar field verbatim, or parses the comma list for `Services`.
    pub fn set_field(&mut self, field: ProfileField, value: &str) {
        match field {
            ProfileField::Name => self.name = value.to_string(),
            ProfileField::Role => self.role = value.to_string(),
            ProfileField::City => self.city = value.to_string(),
            ProfileField::Availability => self.availability = value.to_string(),
            ProfileField::Whatsapp => self.whatsapp = value.to_string(),
            ProfileField::Bio => self.bio = value.to_string(),
            ProfileField::Services => self.set_services_from(value),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationReport> {
        let missing: Vec<ProfileField> = ProfileField::ALL
            .iter()
            .copied()
            .filter(|field| match self.field(*field) {
                Some(value) => value.trim().is_empty(),
                None => !self.has_services(),
            })
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport::new(missing))
        }
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
impl ProfileDraft {
    /// Complete Jane Doe draft used across unit tests.
    pub(crate) fn sample() -> Self {
        let mut draft = Self::new();
        draft.name = "Jane Doe".into();
        draft.role = "Consultant".into();
        draft.city = "KL".into();
        draft.availability = "9-5".into();
        draft.whatsapp = "+60111".into();
        draft.bio = "Helps businesses grow.".into();
        draft.services = vec!["Strategy".into(), "Coaching".into()];
        draft
    }
}

/// Lowercases the name and strips every whitespace character.
pub fn derive_username(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Splits a comma-delimited list, trimming segments and dropping empty ones.
pub fn parse_services(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}
