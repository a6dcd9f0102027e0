use crate::archive::format::{DirectoryEntry, DirectoryTable};
use crate::archive::manager::TrainedData;
use crate::error::{Result, TrainedDataError};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

impl TrainedData {
    /// Open and load an archive file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut data = Self::new();
        data.init(path)?;
        Ok(data)
    }

    /// Load an archive file, replacing the current contents.
    ///
    /// On failure the archive is left empty; partially decoded state is never kept.
    pub fn init<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let loaded = fs::read(path)
            .map_err(TrainedDataError::from)
            .and_then(|bytes| Self::from_bytes(&bytes));

        match loaded {
            Ok(loaded) => {
                *self = loaded;
                tracing::debug!(
                    path = %path.display(),
                    components = self.len(),
                    swapped = self.swap,
                    "Loaded archive"
                );
                Ok(())
            }
            Err(err) => {
                self.clear();
                tracing::debug!(path = %path.display(), error = %err, "Failed to load archive");
                Err(err)
            }
        }
    }

    /// Partition an in-memory archive image into component buffers
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let table = DirectoryTable::read_from(data)?;
        let entries = table.entries(data.len() as u64)?;

        let mut archive = Self::new();
        archive.swap = table.swapped;
        for entry in entries {
            let start = entry.offset as usize;
            let end = start + entry.size as usize;
            archive.entries[entry.kind.index()] = Some(data[start..end].to_vec());
        }
        Ok(archive)
    }

    /// Read only the directory of an archive file, without loading any
    /// component bytes
    pub fn read_directory<P: AsRef<Path>>(path: P) -> Result<Vec<DirectoryEntry>> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let table = DirectoryTable::read_from(BufReader::new(file))?;
        table.entries(file_len)
    }
}
