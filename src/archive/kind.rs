use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Number of component kinds known to this version of the format
pub const NUM_COMPONENT_KINDS: usize = 25;

/// Identifies what a component buffer contains.
///
/// The numeric order is the directory order of the archive and is append-only:
/// existing indices never move, so older archives keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum ComponentKind {
    LangConfig = 0,
    Unicharset = 1,
    Ambigs = 2,
    IntTemplates = 3,
    PffmTable = 4,
    NormProto = 5,
    PuncDawg = 6,
    SystemDawg = 7,
    NumberDawg = 8,
    FreqDawg = 9,
    FixedLengthDawgs = 10,
    CubeUnicharset = 11,
    CubeSystemDawg = 12,
    ShapeTable = 13,
    BigramDawg = 14,
    UnambigDawg = 15,
    ParamsModel = 16,
    Lstm = 17,
    LstmPuncDawg = 18,
    LstmSystemDawg = 19,
    LstmNumberDawg = 20,
    LstmUnicharset = 21,
    LstmRecoder = 22,
    Version = 23,
    FontProperties = 24,
}

impl ComponentKind {
    /// Every kind, in directory order
    pub const ALL: [ComponentKind; NUM_COMPONENT_KINDS] = [
        Self::LangConfig,
        Self::Unicharset,
        Self::Ambigs,
        Self::IntTemplates,
        Self::PffmTable,
        Self::NormProto,
        Self::PuncDawg,
        Self::SystemDawg,
        Self::NumberDawg,
        Self::FreqDawg,
        Self::FixedLengthDawgs,
        Self::CubeUnicharset,
        Self::CubeSystemDawg,
        Self::ShapeTable,
        Self::BigramDawg,
        Self::UnambigDawg,
        Self::ParamsModel,
        Self::Lstm,
        Self::LstmPuncDawg,
        Self::LstmSystemDawg,
        Self::LstmNumberDawg,
        Self::LstmUnicharset,
        Self::LstmRecoder,
        Self::Version,
        Self::FontProperties,
    ];

    /// Position of this kind in the archive directory
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical file suffix (without the leading dot)
    pub fn suffix(self) -> &'static str {
        match self {
            Self::LangConfig => "config",
            Self::Unicharset => "unicharset",
            Self::Ambigs => "unicharambigs",
            Self::IntTemplates => "inttemp",
            Self::PffmTable => "pffmtable",
            Self::NormProto => "normproto",
            Self::PuncDawg => "punc-dawg",
            Self::SystemDawg => "word-dawg",
            Self::NumberDawg => "number-dawg",
            Self::FreqDawg => "freq-dawg",
            Self::FixedLengthDawgs => "fixed-length-dawgs",
            Self::CubeUnicharset => "cube-unicharset",
            Self::CubeSystemDawg => "cube-word-dawg",
            Self::ShapeTable => "shapetable",
            Self::BigramDawg => "bigram-dawg",
            Self::UnambigDawg => "unambig-dawg",
            Self::ParamsModel => "params-model",
            Self::Lstm => "lstm",
            Self::LstmPuncDawg => "lstm-punc-dawg",
            Self::LstmSystemDawg => "lstm-word-dawg",
            Self::LstmNumberDawg => "lstm-number-dawg",
            Self::LstmUnicharset => "lstm-unicharset",
            Self::LstmRecoder => "lstm-recoder",
            Self::Version => "version",
            Self::FontProperties => "properties",
        }
    }

    /// Look up a kind by suffix. Accepts canonical suffixes and the short
    /// `ambigs` alias.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        if suffix == "ambigs" {
            return Some(Self::Ambigs);
        }
        Self::ALL.iter().copied().find(|kind| kind.suffix() == suffix)
    }

    /// Infer the kind from the text after the last `.` of the file name
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let name = path.as_ref().file_name()?.to_str()?;
        let (_, suffix) = name.rsplit_once('.')?;
        Self::from_suffix(suffix)
    }

    /// Human-readable description for listings
    pub fn description(self) -> &'static str {
        match self {
            Self::LangConfig => "language configuration",
            Self::Unicharset => "unicharset",
            Self::Ambigs => "unichar ambiguities",
            Self::IntTemplates => "classifier templates (quantized)",
            Self::PffmTable => "classifier feature counts",
            Self::NormProto => "classifier templates (float)",
            Self::PuncDawg => "punctuation dictionary",
            Self::SystemDawg => "system dictionary",
            Self::NumberDawg => "number dictionary",
            Self::FreqDawg => "frequent-word dictionary",
            Self::FixedLengthDawgs => "fixed-length dictionaries",
            Self::CubeUnicharset => "cube unicharset",
            Self::CubeSystemDawg => "cube system dictionary",
            Self::ShapeTable => "shape table",
            Self::BigramDawg => "word-bigram dictionary",
            Self::UnambigDawg => "unambiguous-word dictionary",
            Self::ParamsModel => "params model",
            Self::Lstm => "LSTM network",
            Self::LstmPuncDawg => "LSTM punctuation dictionary",
            Self::LstmSystemDawg => "LSTM system dictionary",
            Self::LstmNumberDawg => "LSTM number dictionary",
            Self::LstmUnicharset => "LSTM unicharset",
            Self::LstmRecoder => "LSTM recoder",
            Self::Version => "version string",
            Self::FontProperties => "font properties",
        }
    }

    /// Kinds kept only so that old archives keep their slot positions
    pub fn is_deprecated(self) -> bool {
        matches!(
            self,
            Self::FixedLengthDawgs | Self::CubeUnicharset | Self::CubeSystemDawg
        )
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_index_roundtrip() {
        for (i, kind) in ComponentKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(ComponentKind::from_index(i), Some(*kind));
        }
        assert_eq!(ComponentKind::from_index(NUM_COMPONENT_KINDS), None);
    }

    #[test]
    fn test_suffixes_are_unique_and_total() {
        let suffixes: HashSet<&str> = ComponentKind::ALL.iter().map(|k| k.suffix()).collect();
        assert_eq!(suffixes.len(), NUM_COMPONENT_KINDS);
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_suffix(kind.suffix()), Some(kind));
        }
    }

    #[test]
    fn test_stable_positions() {
        assert_eq!(ComponentKind::LangConfig.index(), 0);
        assert_eq!(ComponentKind::Unicharset.index(), 1);
        assert_eq!(ComponentKind::Lstm.index(), 17);
        assert_eq!(ComponentKind::Version.index(), 23);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ComponentKind::from_path("eng.unicharset"), Some(ComponentKind::Unicharset));
        assert_eq!(
            ComponentKind::from_path("/tmp/v1.2/eng.lstm-punc-dawg"),
            Some(ComponentKind::LstmPuncDawg)
        );
        assert_eq!(ComponentKind::from_path("eng.ambigs"), Some(ComponentKind::Ambigs));
        assert_eq!(ComponentKind::from_path("eng.properties"), Some(ComponentKind::FontProperties));
        assert_eq!(ComponentKind::from_path("eng.traineddata"), None);
        assert_eq!(ComponentKind::from_path("unicharset"), None);
    }
}
