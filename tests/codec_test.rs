//! Codec symmetry tests
//!
//! Every value type must decode to the same logical value whether it was
//! written on a host of the same byte order (swap = false) or the opposite
//! one (swap = true).

use std::fmt::Debug;
use std::time::{Duration, Instant};
use traineddata_rs::{
    Array2D, BitVector, ComponentKind, Deserializer, FontInfo, FontInfoTable, FontProperties,
    FontSet, FontSpacingInfo, ICoord, NetworkWeights, Rect, Serializable, Serializer, TrainedData,
    TrainedDataError, WeightMatrix,
};

/// Helper: Encode natively and foreign-endian, decode both, compare
fn assert_endian_symmetric<T: Serializable + PartialEq + Debug>(value: &T) {
    let native = value.to_bytes().unwrap();
    assert_eq!(&T::from_bytes(&native, false).unwrap(), value);

    let mut ser = Serializer::swapped(Vec::new());
    value.serialize(&mut ser).unwrap();
    let foreign = ser.into_inner();
    assert_eq!(foreign.len(), native.len());
    assert_eq!(&T::from_bytes(&foreign, true).unwrap(), value);

    // Re-encoding the foreign value on this host reproduces the native bytes.
    let decoded = T::from_bytes(&foreign, true).unwrap();
    assert_eq!(decoded.to_bytes().unwrap(), native);
}

fn sample_font_table() -> FontInfoTable {
    let mut table = FontInfoTable::new();

    let mut arial = FontInfo::new("Arial", FontProperties::BOLD);
    arial.init_spacing(3);
    arial.add_spacing(0, FontSpacingInfo::new(2, 3).with_kerning(1, -4).with_kerning(2, 1));
    arial.add_spacing(2, FontSpacingInfo::new(-1, 0));
    table.push(arial);

    table.push(FontInfo::new("Fraktur", FontProperties::FRAKTUR | FontProperties::SERIF));
    table
}

#[test]
fn test_font_table_symmetry() {
    assert_endian_symmetric(&sample_font_table());
    assert_endian_symmetric(&FontInfoTable::new());
}

#[test]
fn test_bit_vector_symmetry() {
    let mut v = BitVector::new(77);
    for i in [0, 9, 31, 32, 33, 76] {
        v.set_bit(i);
    }
    assert_endian_symmetric(&v);
    assert_endian_symmetric(&BitVector::new(0));
}

#[test]
fn test_rect_symmetry() {
    assert_endian_symmetric(&Rect::from_coords(-12, 300, 4096, 5000));
    let p = ICoord::new(7, -7);
    assert_endian_symmetric(&Rect::new(p, p));
    assert_endian_symmetric(&p);
}

#[test]
fn test_font_set_symmetry() {
    assert_endian_symmetric(&FontSet::new(vec![0, 1, 65_536, -1]));
    assert_endian_symmetric(&FontSet::default());
}

#[test]
fn test_network_weights_symmetry() {
    let rows = vec![vec![0.1, -0.7, 0.35], vec![1.5, 0.0, -2.25]];
    let mut quantized = WeightMatrix::from_float(Array2D::from_rows(&rows).unwrap());
    quantized.convert_to_int();
    let network = NetworkWeights::new(
        "[1,48,0,1 Ct3,3,16 Mp3,3 Lfys64 O1c105]",
        vec![WeightMatrix::from_float(Array2D::from_rows(&rows).unwrap()), quantized],
    );
    assert_endian_symmetric(&network);
}

#[test]
fn test_swap_is_threaded_through_nested_values() {
    let mut ser = Serializer::swapped(Vec::new());
    ser.write_objects(&[Rect::from_coords(1, 2, 3, 4), Rect::from_coords(5, 6, 7, 8)])
        .unwrap();
    ser.write_optional(Some(&FontSet::new(vec![42]))).unwrap();
    ser.write_optional::<FontSet>(None).unwrap();
    let bytes = ser.into_inner();

    let mut de = Deserializer::new(&bytes[..], true);
    let rects: Vec<Rect> = de.read_objects("rects").unwrap();
    assert_eq!(rects[1], Rect::from_coords(5, 6, 7, 8));
    assert_eq!(de.read_optional::<FontSet>().unwrap(), Some(FontSet::new(vec![42])));
    assert_eq!(de.read_optional::<FontSet>().unwrap(), None);
    assert_eq!(de.bytes_read(), bytes.len() as u64);
}

#[test]
fn test_typed_component_in_foreign_archive() {
    let mut data = TrainedData::new();
    data.set_swapped(true);
    data.encode(ComponentKind::Lstm, &NetworkWeights::new("[1,1,0,1 O1c1]", Vec::new()))
        .unwrap();

    let reloaded = TrainedData::from_bytes(&data.to_bytes().unwrap()).unwrap();
    assert!(reloaded.is_swapped());
    let network: NetworkWeights = reloaded.decode_required(ComponentKind::Lstm).unwrap();
    assert_eq!(network.spec, "[1,1,0,1 O1c1]");
    assert!(network.layers.is_empty());
}

#[test]
fn test_decoding_with_wrong_swap_fails_or_differs() {
    let table = sample_font_table();
    let bytes = table.to_bytes().unwrap();
    match FontInfoTable::from_bytes(&bytes, true) {
        Err(err) => assert!(err.is_malformed(), "got {:?}", err),
        Ok(decoded) => assert_ne!(decoded, table),
    }
}

#[test]
fn test_truncated_nested_structure() {
    let bytes = sample_font_table().to_bytes().unwrap();
    for cut in [0, 3, 10, bytes.len() / 2, bytes.len() - 1] {
        let err = FontInfoTable::from_bytes(&bytes[..cut], false).unwrap_err();
        assert!(
            matches!(err, TrainedDataError::Truncated(_)),
            "cut at {}: {:?}",
            cut,
            err
        );
    }
}

#[test]
fn test_large_font_table_decodes_in_linear_time() {
    let fonts = 100_000;
    let text: String = (0..fonts).map(|i| format!("font{} 0 1 0 0 0\n", i)).collect();

    let start = Instant::now();
    let table = FontInfoTable::parse_font_properties(&text).unwrap();
    let bytes = table.to_bytes().unwrap();
    let decoded = FontInfoTable::from_bytes(&bytes, false).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(decoded.len(), fonts);
    assert_eq!(decoded.get_index("font99999"), Some(fonts - 1));
    assert!(elapsed < Duration::from_secs(10), "took {:?}", elapsed);
}
