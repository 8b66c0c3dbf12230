//! "Save Card": bundles the generated artifacts and photos into a zip.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;
use zip::write::FileOptions;

use crate::generation::GeneratedArtifacts;
use crate::profiles::Attachment;
use crate::storage::files::{hash_path, sanitize_file_name};

pub const CARD_ENTRY: &str = "card.txt";
pub const CONDENSED_BIO_ENTRY: &str = "condensed_bio.txt";
pub const PHOTOS_DIR: &str = "photos";

#[derive(Debug, Clone, Serialize)]
pub struct ExportDescriptor {
    pub bundle_id: Uuid,
    pub username: String,
    pub path: PathBuf,
    pub entries: Vec<String>,
    pub size_bytes: u64,
    pub checksum: String,
}

/// Writes `destination` as a zip; never overwrites an existing file and
/// never leaves a partial bundle behind.
pub fn export_card_bundle(
    artifacts: &GeneratedArtifacts,
    photos: &[Attachment],
    destination: &Path,
) -> Result<ExportDescriptor> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Unable to create {}", parent.display()))?;
    }

    let file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            bail!("Destination {} already exists", destination.display())
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to create {}", destination.display()))
        }
    };
    let entries = discard_on_error(destination, write_bundle(file, artifacts, photos))?;
    let checksum = discard_on_error(destination, hash_path(destination))?;

    let metadata = fs::metadata(destination)
        .with_context(|| format!("Missing bundle {}", destination.display()))?;
    Ok(ExportDescriptor {
        bundle_id: Uuid::new_v4(),
        username: artifacts.username.clone(),
        path: destination.to_path_buf(),
        entries,
        size_bytes: metadata.len(),
        checksum,
    })
}

/// Writes every entry and finishes the archive; returns the entry names.
fn write_bundle<W: Write + Seek>(
    writer: W,
    artifacts: &GeneratedArtifacts,
    photos: &[Attachment],
) -> Result<Vec<String>> {
    let mut zip = zip::ZipWriter::new(writer);
    let options = FileOptions::default();
    let mut entries = Vec::new();

    for (name, contents) in [
        (CARD_ENTRY, artifacts.card_text.as_bytes()),
        (CONDENSED_BIO_ENTRY, artifacts.condensed_bio.as_bytes()),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(contents)?;
        entries.push(name.to_string());
    }
    for (index, photo) in photos.iter().enumerate() {
        let name = format!(
            "{PHOTOS_DIR}/{}-{}",
            index + 1,
            sanitize_file_name(&photo.file_name)
        );
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&photo.bytes)?;
        entries.push(name);
    }
    zip.finish()?;
    Ok(entries)
}

/// Removes the half-written `destination` when `result` failed.
fn discard_on_error<T>(destination: &Path, result: Result<T>) -> Result<T> {
    if result.is_err() {
        if let Err(err) = fs::remove_file(destination) {
            warn!(path = %destination.display(), error = %err, "could not remove partial bundle");
        }
    }
    result
}
