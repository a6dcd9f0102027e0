#![no_main]

use libfuzzer_sys::fuzz_target;
use traineddata_rs::{
    BitVector, ComponentKind, FontInfoTable, FontSet, LangConfig, NetworkWeights, Rect,
    Serializable, TrainedData,
};

fuzz_target!(|data: &[u8]| {
    // Whole input as an archive - should never panic
    if let Ok(archive) = TrainedData::from_bytes(data) {
        let _ = archive.directory();
        let _ = archive.version_string();
        let _ = archive.to_bytes();
        let _ = archive.decode::<NetworkWeights>(ComponentKind::Lstm);
        if let Some(bytes) = archive.component(ComponentKind::LangConfig) {
            let _ = LangConfig::from_bytes(bytes);
        }
    }

    // Whole input as each typed component, in both byte orders
    for swap in [false, true] {
        let _ = FontInfoTable::from_bytes(data, swap);
        let _ = BitVector::from_bytes(data, swap);
        let _ = Rect::from_bytes(data, swap);
        let _ = FontSet::from_bytes(data, swap);
        let _ = NetworkWeights::from_bytes(data, swap);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = FontInfoTable::parse_font_properties(text);
    }
});
