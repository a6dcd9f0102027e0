//! Traineddata-rs: trained-model component archives and their binary codec
//!
//! This library provides a complete implementation of the traineddata
//! container format, combining:
//! - An archive manager over a fixed set of named component slots
//!   (combine, extract, selective overwrite, directory listing)
//! - Atomic saves that never leave a half-written archive behind
//! - A swap-aware binary codec for component values written on hosts of
//!   either byte order
//! - Component value types: font tables, bit vectors, rectangles, weight
//!   matrices, language config
//! - Manifests with per-component SHA-256 hashes (JSON or TOML)
//!
//! # Example
//!
//! ```no_run
//! use traineddata_rs::{ComponentKind, ExtractOutcome, TrainedData};
//!
//! // Build an archive from eng.unicharset, eng.config, ...
//! let mut data = TrainedData::new();
//! data.combine_data_files("tessdata/eng.", "tessdata/eng.traineddata")?;
//!
//! // Replace one component without touching the others
//! data.overwrite_entry(ComponentKind::LangConfig, b"tessedit_ocr_engine_mode 1\n".to_vec());
//! data.save_file("tessdata/eng.traineddata")?;
//!
//! // Pull a component back out
//! let data = TrainedData::open("tessdata/eng.traineddata")?;
//! match data.extract_to_file("eng.unicharambigs")? {
//!     ExtractOutcome::Written => println!("extracted"),
//!     ExtractOutcome::NotPresent => println!("not in this model"),
//! }
//! # Ok::<(), traineddata_rs::error::TrainedDataError>(())
//! ```

// Core modules
pub mod archive;
pub mod error;
pub mod manifest;
pub mod serial;
pub mod types;

// Re-export commonly used types
pub use archive::{
    component_path, ComponentKind, DirectoryEntry, ExtractOutcome, TrainedData, ARCHIVE_SUFFIX,
    HEADER_SIZE, NUM_COMPONENT_KINDS,
};
pub use error::{Result, TrainedDataError};
pub use manifest::{ByteOrder, ComponentEntry, Manifest, ManifestChange};
pub use serial::{Deserializer, Serializable, Serializer};
pub use types::{
    Array2D, BitVector, FontInfo, FontInfoTable, FontProperties, FontSet, FontSpacingInfo, ICoord,
    LangConfig, NetworkWeights, Rect, WeightMatrix,
};
