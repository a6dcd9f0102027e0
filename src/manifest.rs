//! Manifest support for traineddata archives
//!
//! A manifest is an inventory of an archive: which components it holds,
//! where each sits in the file, and a SHA-256 of each component's bytes.
//! It is never stored inside the archive; it is exported next to it for
//! diagnostics and for checking that a rebuilt archive carries the same
//! components as before.
//!
//! # Usage
//!
//! ```no_run
//! use traineddata_rs::{Manifest, TrainedData};
//! # use traineddata_rs::error::Result;
//!
//! # fn main() -> Result<()> {
//! let data = TrainedData::open("tessdata/eng.traineddata")?;
//! let manifest = Manifest::from_trained_data(&data);
//! manifest.write_to_path("eng.manifest.toml")?;
//!
//! // Later, after patching the archive:
//! let patched = TrainedData::open("tessdata/eng.traineddata")?;
//! for change in manifest.verify(&patched) {
//!     println!("{}", change);
//! }
//! # Ok(())
//! # }
//! ```

use crate::archive::{ComponentKind, TrainedData, ARCHIVE_SUFFIX, HEADER_SIZE};
use crate::error::{Result, TrainedDataError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;

/// Manifest structure version
pub const MANIFEST_VERSION: &str = "1.0";

/// Byte order of an archive's directory and components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn host() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Order of data that is byte-swapped relative to the host when `swapped`
    pub fn for_swap(swapped: bool) -> Self {
        match (Self::host(), swapped) {
            (order, false) => order,
            (ByteOrder::Little, true) => ByteOrder::Big,
            (ByteOrder::Big, true) => ByteOrder::Little,
        }
    }
}

/// Traineddata manifest structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub manifest_version: String,

    /// Archive format name
    pub format: String,

    /// Contents of the version component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub byte_order: ByteOrder,

    /// Size of the saved archive in bytes
    pub total_size: u64,

    /// Present components, in directory order
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
}

/// Component entry in manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub kind: ComponentKind,

    /// File name suffix of the standalone component file
    pub suffix: String,

    /// Offset within the saved archive
    pub offset: u64,

    pub size: u64,

    /// SHA-256 of the component bytes (hex)
    pub sha256: String,
}

/// A difference between a manifest and an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestChange {
    /// Present in both, with different bytes
    Modified(ComponentKind),
    /// Listed in the manifest, absent from the archive
    Removed(ComponentKind),
    /// Present in the archive, not listed in the manifest
    Added(ComponentKind),
}

impl fmt::Display for ManifestChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestChange::Modified(kind) => write!(f, "modified: {}", kind),
            ManifestChange::Removed(kind) => write!(f, "removed: {}", kind),
            ManifestChange::Added(kind) => write!(f, "added: {}", kind),
        }
    }
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

impl Manifest {
    /// Inventory the components of an archive as it would be saved
    pub fn from_trained_data(data: &TrainedData) -> Self {
        let components: Vec<ComponentEntry> = data
            .directory()
            .into_iter()
            .map(|entry| ComponentEntry {
                kind: entry.kind,
                suffix: entry.kind.suffix().to_string(),
                offset: entry.offset,
                size: entry.size,
                sha256: sha256_hex(data.component(entry.kind).unwrap_or_default()),
            })
            .collect();

        Self {
            manifest_version: MANIFEST_VERSION.to_string(),
            format: ARCHIVE_SUFFIX.to_string(),
            version: data.version_string(),
            byte_order: ByteOrder::for_swap(data.is_swapped()),
            total_size: HEADER_SIZE + components.iter().map(|c| c.size).sum::<u64>(),
            components,
        }
    }

    pub fn component(&self, kind: ComponentKind) -> Option<&ComponentEntry> {
        self.components.iter().find(|entry| entry.kind == kind)
    }

    /// Compare against an archive, returning every component whose presence
    /// or bytes differ. Empty when the archive matches.
    pub fn verify(&self, data: &TrainedData) -> Vec<ManifestChange> {
        let mut changes = Vec::new();
        for kind in ComponentKind::ALL {
            match (self.component(kind), data.component(kind)) {
                (Some(entry), Some(bytes)) => {
                    if entry.size != bytes.len() as u64 || entry.sha256 != sha256_hex(bytes) {
                        changes.push(ManifestChange::Modified(kind));
                    }
                }
                (Some(_), None) => changes.push(ManifestChange::Removed(kind)),
                (None, Some(_)) => changes.push(ManifestChange::Added(kind)),
                (None, None) => {}
            }
        }
        changes
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(TrainedDataError::from)
    }

    /// Parse from JSON
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(TrainedDataError::from)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parse from TOML
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Write as TOML if `path` ends in `.toml`, JSON otherwise
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = if is_toml(path) {
            self.to_toml()?.into_bytes()
        } else {
            self.to_json()?
        };
        fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), components = self.components.len(), "Wrote manifest");
        Ok(())
    }

    /// Read a manifest written by [`Manifest::write_to_path`]
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        if is_toml(path) {
            let text = String::from_utf8(bytes)
                .map_err(|e| TrainedDataError::Toml(format!("Manifest is not UTF-8: {}", e)))?;
            Self::from_toml(&text)
        } else {
            Self::from_json(&bytes)
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
