//! Generate seed corpus for fuzzing

use std::fs;
use traineddata_rs::{
    Array2D, BitVector, ComponentKind, FontInfo, FontInfoTable, FontProperties, FontSpacingInfo,
    NetworkWeights, TrainedData, WeightMatrix,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let corpus_dir = "fuzz/corpus/fuzz_archive_parse";
    fs::create_dir_all(corpus_dir)?;

    println!("Generating seed corpus...");

    // Seed 1: Empty archive (directory only)
    {
        let path = format!("{}/seed_empty.traineddata", corpus_dir);
        TrainedData::new().save_file(&path)?;
        println!("Generated: {}", path);
    }

    // Seed 2: Text components
    {
        let path = format!("{}/seed_text.traineddata", corpus_dir);
        let mut data = TrainedData::new();
        data.overwrite_entry(ComponentKind::LangConfig, b"tessedit_ocr_engine_mode 1\n".to_vec());
        data.overwrite_entry(ComponentKind::Unicharset, b"1\nNULL 0 Common 0\n".to_vec());
        data.set_version_string("4.1.0");
        data.save_file(&path)?;
        println!("Generated: {}", path);
    }

    // Seed 3: Foreign byte order with a network component
    {
        let path = format!("{}/seed_swapped_lstm.traineddata", corpus_dir);
        let mut data = TrainedData::new();
        data.set_swapped(true);
        let weights = Array2D::from_rows(&[vec![0.5, -0.25], vec![1.0, 0.0]])?;
        let mut quantized = WeightMatrix::from_float(weights.clone());
        quantized.convert_to_int();
        let network = NetworkWeights::new(
            "[1,1,0,2 O1c2]",
            vec![WeightMatrix::from_float(weights), quantized],
        );
        data.encode(ComponentKind::Lstm, &network)?;
        data.save_file(&path)?;
        println!("Generated: {}", path);
    }

    // Seed 4: Font table with spacing
    {
        let path = format!("{}/seed_font_table.bin", corpus_dir);
        let mut table = FontInfoTable::new();
        let mut font = FontInfo::new("Arial", FontProperties::BOLD);
        font.init_spacing(2);
        font.add_spacing(0, FontSpacingInfo::new(1, 2).with_kerning(1, -1));
        table.push(font);
        fs::write(&path, serialize(&table)?)?;
        println!("Generated: {}", path);
    }

    // Seed 5: Bit vector
    {
        let path = format!("{}/seed_bit_vector.bin", corpus_dir);
        let mut bits = BitVector::new(70);
        bits.set_bit(3);
        bits.set_bit(69);
        fs::write(&path, serialize(&bits)?)?;
        println!("Generated: {}", path);
    }

    // Seed 6: Empty component
    {
        let path = format!("{}/seed_zero_length.traineddata", corpus_dir);
        let mut data = TrainedData::new();
        data.overwrite_entry(ComponentKind::Ambigs, Vec::new());
        data.save_file(&path)?;
        println!("Generated: {}", path);
    }

    println!("\nGenerated 6 seed files in {}", corpus_dir);
    Ok(())
}

fn serialize<T: traineddata_rs::Serializable>(value: &T) -> traineddata_rs::Result<Vec<u8>> {
    value.to_bytes()
}
