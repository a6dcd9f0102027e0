mod files;
mod format;
mod kind;
mod manager;
mod reader;
mod writer;

pub use files::{component_path, ExtractOutcome};
pub use format::{
    header_size, DirectoryEntry, DirectoryTable, ABSENT_OFFSET, ARCHIVE_SUFFIX, HEADER_SIZE,
    MAX_NUM_ENTRIES,
};
pub use kind::{ComponentKind, NUM_COMPONENT_KINDS};
pub use manager::TrainedData;
