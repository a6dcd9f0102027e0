use crate::archive::format::DirectoryTable;
use crate::archive::manager::TrainedData;
use crate::error::Result;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Temporary file in `dir` created with the mode a plain `File::create` gets
#[cfg(unix)]
fn create_temp_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn create_temp_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

impl TrainedData {
    /// Write the directory followed by all present components, returning
    /// the number of bytes written
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<u64> {
        let mut table = DirectoryTable::for_sizes(&self.sizes());
        table.swapped = self.swap;

        let mut written = table.write_to(&mut writer)?;
        for bytes in self.entries.iter().flatten() {
            writer.write_all(bytes)?;
            written += bytes.len() as u64;
        }
        writer.flush()?;
        Ok(written)
    }

    /// Serialize the whole archive into memory
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Save the archive to `path`.
    ///
    /// Writes to a temporary file in the same directory and renames it over
    /// `path` only after the write and sync succeed. On failure the previous
    /// file at `path` is untouched and the temporary file is removed.
    ///
    /// An existing file's permissions carry over to its replacement; a new
    /// file gets the same mode `File::create` would give it.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = create_temp_in(dir)?;
        let written = self.write_to(BufWriter::new(temp.as_file_mut()))?;
        temp.as_file().sync_all()?;

        // A replaced archive keeps its mode.
        match fs::metadata(path) {
            Ok(existing) if existing.is_file() => {
                temp.as_file().set_permissions(existing.permissions())?;
            }
            _ => {}
        }
        temp.persist(path)?;

        tracing::debug!(
            path = %path.display(),
            bytes = written,
            components = self.len(),
            "Saved archive"
        );
        Ok(())
    }
}
