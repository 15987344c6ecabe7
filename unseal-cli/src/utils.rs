//! Common utility functions shared across CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha3::{Digest, Sha3_256};
use tracing::info;
use unseal_core::ImageFormat;

/// Build the default output path for a cleaned image.
///
/// Transforms `photo.jpg` into `photo.jpg.cleaned.jpg`.
pub fn build_cleaned_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".cleaned");
    if let Some(ext) = file.extension() {
        name.push(".");
        name.push(ext);
    }
    PathBuf::from(name)
}

/// Whether a path has one of the extensions batch checks look at.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ImageFormat::from_extension(ext).is_supported())
        .unwrap_or(false)
}

/// Read an input file with the error message exit code classification expects.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let content =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "Read file");
    Ok(content)
}

/// Hex SHA3-256 digest of `data`.
pub fn sha3_hex(data: &[u8]) -> String {
    hex::encode(Sha3_256::digest(data))
}

/// Size of `new` as a percentage of `old`.
pub fn size_ratio(new: usize, old: usize) -> f64 {
    if old == 0 {
        return 0.0;
    }
    new as f64 / old as f64 * 100.0
}
