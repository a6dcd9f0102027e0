use crate::archive::kind::{ComponentKind, NUM_COMPONENT_KINDS};
use crate::error::{Result, TrainedDataError};
use crate::serial::{Deserializer, Serializer};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// File suffix of a combined archive
pub const ARCHIVE_SUFFIX: &str = "traineddata";

/// Largest directory slot count a reader accepts.
/// Also the endianness test: a count outside `0..=MAX_NUM_ENTRIES` must be byte-swapped.
pub const MAX_NUM_ENTRIES: i32 = 1000;

/// Directory offset marking an absent component
pub const ABSENT_OFFSET: i64 = -1;

/// Size of the directory header for the given slot count
pub const fn header_size(num_entries: usize) -> u64 {
    4 + 8 * num_entries as u64
}

/// Size of the directory header this version writes
pub const HEADER_SIZE: u64 = header_size(NUM_COMPONENT_KINDS);

/// One present component's byte range within an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub kind: ComponentKind,
    pub offset: u64,
    pub size: u64,
}

/// Archive directory table
///
/// Structure:
/// - Entry count: int32 (4 bytes)
/// - Offsets: int64 per slot, in component kind order, -1 when absent
///
/// Both fields are in the producer's byte order. The directory is followed by
/// the component bytes concatenated in the same order; each present
/// component ends where the next present one begins (or at end of file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTable {
    pub offsets: Vec<i64>,
    /// True when the table was read from (or is to be written in) the
    /// opposite of host byte order
    pub swapped: bool,
}

impl DirectoryTable {
    /// Lay out a full-size directory for the given per-kind sizes
    pub fn for_sizes(sizes: &[Option<u64>; NUM_COMPONENT_KINDS]) -> Self {
        let mut offsets = Vec::with_capacity(NUM_COMPONENT_KINDS);
        let mut offset = HEADER_SIZE;
        for size in sizes {
            match size {
                Some(size) => {
                    offsets.push(offset as i64);
                    offset += size;
                }
                None => offsets.push(ABSENT_OFFSET),
            }
        }
        Self {
            offsets,
            swapped: false,
        }
    }

    pub fn num_entries(&self) -> usize {
        self.offsets.len()
    }

    /// Write the directory, returning the number of bytes written
    pub fn write_to<W: Write>(&self, writer: W) -> Result<u64> {
        let mut ser = Serializer::with_swap(writer, self.swapped);
        ser.write(self.offsets.len() as i32)?;
        ser.write_slice(&self.offsets)?;
        Ok(ser.bytes_written())
    }

    /// Read the directory, detecting the producer's byte order from the
    /// entry count
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut de = Deserializer::new(reader, false);
        let raw: i32 = de.read()?;

        let valid = |n: i32| (0..=MAX_NUM_ENTRIES).contains(&n);
        let (count, swapped) = if valid(raw) {
            (raw, false)
        } else if valid(raw.swap_bytes()) {
            (raw.swap_bytes(), true)
        } else {
            return Err(TrainedDataError::CorruptDirectory(format!(
                "Implausible entry count: {}",
                raw
            )));
        };

        let mut de = Deserializer::new(de.into_inner(), swapped);
        let offsets = de.read_slice::<i64>(count as usize, "directory offsets")?;

        Ok(Self { offsets, swapped })
    }

    /// Resolve the byte ranges of all present, known components.
    ///
    /// Fails if any offset points into the directory, past the end of the
    /// file, or before an earlier component.
    pub fn entries(&self, file_len: u64) -> Result<Vec<DirectoryEntry>> {
        let header = header_size(self.num_entries());
        if file_len < header {
            return Err(TrainedDataError::CorruptDirectory(format!(
                "File of {} bytes is shorter than its {} byte directory",
                file_len, header
            )));
        }

        // Validate all present offsets first so sizes can be taken as differences.
        let mut present = Vec::new();
        let mut previous = header;
        for (index, &offset) in self.offsets.iter().enumerate() {
            if offset == ABSENT_OFFSET {
                continue;
            }
            if offset < 0 {
                return Err(TrainedDataError::CorruptDirectory(format!(
                    "Slot {} has invalid offset {}",
                    index, offset
                )));
            }
            let offset = offset as u64;
            if offset < previous {
                return Err(TrainedDataError::CorruptDirectory(format!(
                    "Slot {} offset {} overlaps preceding data ending at {}",
                    index, offset, previous
                )));
            }
            if offset > file_len {
                return Err(TrainedDataError::CorruptDirectory(format!(
                    "Slot {} offset {} is beyond end of file ({} bytes)",
                    index, offset, file_len
                )));
            }
            present.push((index, offset));
            previous = offset;
        }

        let mut entries = Vec::with_capacity(present.len());
        for (i, &(index, offset)) in present.iter().enumerate() {
            let end = present.get(i + 1).map_or(file_len, |&(_, next)| next);
            match ComponentKind::from_index(index) {
                Some(kind) => entries.push(DirectoryEntry {
                    kind,
                    offset,
                    size: end - offset,
                }),
                None => {
                    tracing::warn!(slot = index, size = end - offset, "Ignoring unknown directory slot");
                }
            }
        }
        Ok(entries)
    }
}
