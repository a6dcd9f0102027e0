use crate::archive::format::{DirectoryEntry, DirectoryTable};
use crate::archive::kind::{ComponentKind, NUM_COMPONENT_KINDS};
use crate::error::{Result, TrainedDataError};
use crate::serial::{Deserializer, Serializable, Serializer};
use crate::types::NetworkWeights;
use std::fmt;

/// In-memory traineddata archive: one optional byte buffer per component kind.
///
/// A component is always replaced wholesale, never patched in place. An
/// absent slot (`None`) is distinct from a present, empty one.
///
/// Not internally synchronized. Callers sharing one instance across threads
/// must serialize load/modify/save sequences themselves.
#[derive(Clone, PartialEq, Eq)]
pub struct TrainedData {
    pub(crate) entries: [Option<Vec<u8>>; NUM_COMPONENT_KINDS],
    pub(crate) swap: bool,
}

impl TrainedData {
    /// Create an empty archive
    pub fn new() -> Self {
        Self {
            entries: std::array::from_fn(|_| None),
            swap: false,
        }
    }

    /// Whether component bytes are in the opposite of host byte order.
    ///
    /// Decided once when the archive is loaded, and preserved on save so that
    /// the directory and component bytes stay consistent.
    pub fn is_swapped(&self) -> bool {
        self.swap
    }

    /// Set the byte order the directory is written in on save
    pub fn set_swapped(&mut self, swap: bool) {
        self.swap = swap;
    }

    /// Check if a component is present
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.entries[kind.index()].is_some()
    }

    /// Raw bytes of a component, if present
    pub fn component(&self, kind: ComponentKind) -> Option<&[u8]> {
        self.entries[kind.index()].as_deref()
    }

    /// Read cursor positioned at the start of a component, carrying this
    /// archive's swap flag. Absence is not an error; callers must check.
    pub fn get_component(&self, kind: ComponentKind) -> Option<Deserializer<&[u8]>> {
        self.component(kind)
            .map(|bytes| Deserializer::new(bytes, self.swap))
    }

    /// Replace a component's bytes wholesale
    pub fn overwrite_entry(&mut self, kind: ComponentKind, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        tracing::debug!(component = %kind, size = bytes.len(), "Overwriting component");
        self.entries[kind.index()] = Some(bytes);
    }

    /// Remove a component, returning its bytes
    pub fn clear_entry(&mut self, kind: ComponentKind) -> Option<Vec<u8>> {
        self.entries[kind.index()].take()
    }

    /// Remove every component
    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|entry| *entry = None);
        self.swap = false;
    }

    /// Number of present components
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present component kinds, in directory order
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }

    pub(crate) fn sizes(&self) -> [Option<u64>; NUM_COMPONENT_KINDS] {
        std::array::from_fn(|i| self.entries[i].as_ref().map(|bytes| bytes.len() as u64))
    }

    /// Present components with the byte range each would occupy when saved
    pub fn directory(&self) -> Vec<DirectoryEntry> {
        let table = DirectoryTable::for_sizes(&self.sizes());
        self.kinds()
            .map(|kind| DirectoryEntry {
                kind,
                offset: table.offsets[kind.index()] as u64,
                size: self.entries[kind.index()]
                    .as_ref()
                    .map_or(0, |bytes| bytes.len() as u64),
            })
            .collect()
    }

    /// Contents of the version component, if present
    pub fn version_string(&self) -> Option<String> {
        self.component(ComponentKind::Version)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn set_version_string(&mut self, version: &str) {
        self.overwrite_entry(ComponentKind::Version, version.as_bytes());
    }

    /// Whether the legacy classifier can be initialized (unicharset and templates)
    pub fn is_base_available(&self) -> bool {
        self.contains(ComponentKind::Unicharset) && self.contains(ComponentKind::IntTemplates)
    }

    /// Whether the LSTM recognizer can be initialized
    pub fn is_lstm_available(&self) -> bool {
        self.contains(ComponentKind::Lstm)
    }

    /// Decode a typed value from a component using this archive's swap flag
    pub fn decode<T: Serializable>(&self, kind: ComponentKind) -> Result<Option<T>> {
        match self.get_component(kind) {
            Some(mut cursor) => Ok(Some(T::deserialize(&mut cursor)?)),
            None => Ok(None),
        }
    }

    /// As [`TrainedData::decode`], but absence is an error
    pub fn decode_required<T: Serializable>(&self, kind: ComponentKind) -> Result<T> {
        self.decode(kind)?
            .ok_or(TrainedDataError::ComponentNotFound(kind))
    }

    /// Encode a typed value into a component, in this archive's byte order
    pub fn encode<T: Serializable>(&mut self, kind: ComponentKind, value: &T) -> Result<()> {
        let mut ser = Serializer::with_swap(Vec::new(), self.swap);
        value.serialize(&mut ser)?;
        self.overwrite_entry(kind, ser.into_inner());
        Ok(())
    }

    /// Quantize the network weights to int8 and overwrite just that component
    pub fn compact_lstm(&mut self) -> Result<()> {
        let mut network: NetworkWeights = self.decode_required(ComponentKind::Lstm)?;
        let before = self.component(ComponentKind::Lstm).map_or(0, <[u8]>::len);
        network.convert_to_int();
        self.encode(ComponentKind::Lstm, &network)?;
        let after = self.component(ComponentKind::Lstm).map_or(0, <[u8]>::len);
        tracing::info!(before, after, layers = network.layers.len(), "Compacted network weights");
        Ok(())
    }
}

impl Default for TrainedData {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TrainedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in self.kinds() {
            map.entry(&kind.suffix(), &self.entries[kind.index()].as_ref().map(Vec::len));
        }
        map.finish()
    }
}
