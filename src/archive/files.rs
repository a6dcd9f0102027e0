//! Conversions between an archive and standalone per-component files.
//!
//! A standalone component file is named `<prefix><suffix>` and holds exactly
//! the bytes of that component's slot: no header, no directory.

use crate::archive::kind::ComponentKind;
use crate::archive::manager::TrainedData;
use crate::error::{Result, TrainedDataError};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of extracting one component to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// The component's bytes were written
    Written,
    /// The kind is valid but the archive does not contain it
    NotPresent,
}

impl ExtractOutcome {
    pub fn is_written(self) -> bool {
        self == ExtractOutcome::Written
    }
}

/// `<prefix><suffix>`, e.g. `tessdata/eng.` + `unicharset`
pub fn component_path<P: AsRef<Path>>(prefix: P, kind: ComponentKind) -> PathBuf {
    let mut name = OsString::from(prefix.as_ref().as_os_str());
    name.push(kind.suffix());
    PathBuf::from(name)
}

fn kind_of(path: &Path) -> Result<ComponentKind> {
    ComponentKind::from_path(path)
        .ok_or_else(|| TrainedDataError::UnknownComponent(path.display().to_string()))
}

impl TrainedData {
    /// Build an archive from every `<prefix><suffix>` file that exists and
    /// save it to `output`. Returns the number of components found.
    ///
    /// Kinds without a standalone file stay absent. Fails if no component
    /// file exists at all.
    pub fn combine_data_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        prefix: P,
        output: Q,
    ) -> Result<usize> {
        let prefix = prefix.as_ref();
        self.clear();

        let mut found = 0;
        for kind in ComponentKind::ALL {
            let path = component_path(prefix, kind);
            match fs::read(&path) {
                Ok(bytes) => {
                    tracing::debug!(path = %path.display(), size = bytes.len(), "Adding component file");
                    self.overwrite_entry(kind, bytes);
                    found += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        if found == 0 {
            return Err(TrainedDataError::NoComponents(prefix.display().to_string()));
        }

        self.save_file(output)?;
        Ok(found)
    }

    /// Write the component selected by `path`'s suffix to `path`.
    ///
    /// Returns [`ExtractOutcome::NotPresent`] when the kind is valid but
    /// absent, and an error when the suffix names no known kind or the write
    /// fails.
    pub fn extract_to_file<P: AsRef<Path>>(&self, path: P) -> Result<ExtractOutcome> {
        let path = path.as_ref();
        let kind = kind_of(path)?;

        match self.component(kind) {
            Some(bytes) => {
                fs::write(path, bytes)?;
                tracing::debug!(path = %path.display(), size = bytes.len(), "Extracted component");
                Ok(ExtractOutcome::Written)
            }
            None => Ok(ExtractOutcome::NotPresent),
        }
    }

    /// Load `archive_path` and extract one component from it
    pub fn extract_from_archive<P: AsRef<Path>, Q: AsRef<Path>>(
        archive_path: P,
        component: Q,
    ) -> Result<ExtractOutcome> {
        Self::open(archive_path)?.extract_to_file(component)
    }

    /// Extract every present component to `<prefix><suffix>`, returning the
    /// paths written in kind order
    pub fn unpack_all<P: AsRef<Path>>(&self, prefix: P) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.len());
        for kind in self.kinds() {
            let path = component_path(&prefix, kind);
            if self.extract_to_file(&path)?.is_written() {
                written.push(path);
            }
        }
        Ok(written)
    }

    /// Load `archive_path`, replace the components named by `inputs` (kind
    /// taken from each file's suffix), and atomically save back over
    /// `archive_path`. Unnamed components are carried over byte for byte.
    pub fn overwrite_components<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        archive_path: P,
        inputs: &[Q],
    ) -> Result<()> {
        let archive_path = archive_path.as_ref();
        self.init(archive_path)?;

        for input in inputs {
            let input = input.as_ref();
            let kind = kind_of(input)?;
            let bytes = fs::read(input)?;
            tracing::info!(component = %kind, path = %input.display(), size = bytes.len(), "Replacing component");
            self.overwrite_entry(kind, bytes);
        }

        self.save_file(archive_path)
    }
}
