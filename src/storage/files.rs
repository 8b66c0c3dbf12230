//! Filesystem helpers for reading/writing store collections.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result returned after writing a JSON collection.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub hash: String,
}

/// Loads a JSON file if it exists.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Option<T>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read(path).with_context(|| format!("Failed reading store file {:?}", path))?;
    let value = serde_json::from_slice(&data)
        .with_context(|| format!("Failed parsing store file {:?}", path))?;
    Ok(Some(value))
}

/// Writes pretty JSON and returns the payload hash.
pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<WriteOutcome> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating store directory {:?}", parent))?;
    }
    let payload = serde_json::to_vec_pretty(value)
        .with_context(|| format!("Failed serializing store file {:?}", path))?;
    let hash = compute_hash(&payload);
    let mut file =
        fs::File::create(path).with_context(|| format!("Failed opening store file {:?}", path))?;
    file.write_all(&payload)?;
    Ok(WriteOutcome {
        path: path.to_path_buf(),
        hash,
    })
}

/// Writes a binary blob such as a gallery photo.
pub fn write_blob<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating blob directory {:?}", parent))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed writing blob {:?}", path))?;
    Ok(path.to_path_buf())
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
/// Leading dots are replaced too, so the result never names a parent or
/// hidden entry.
pub fn sanitize_file_name(name: &str) -> String {
    let mut safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let leading_dots = safe.len() - safe.trim_start_matches('.').len();
    safe.replace_range(..leading_dots, &"_".repeat(leading_dots));
    if safe.is_empty() {
        safe.push('_');
    }
    safe
}

/// Computes a lowercase hex SHA-256 hash of the provided bytes.
pub fn compute_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}

/// SHA-256 of a file's contents.
pub fn hash_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed reading {:?}", path))?;
    Ok(compute_hash(&bytes))
}
