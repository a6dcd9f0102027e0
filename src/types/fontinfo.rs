//! Font records, their per-character spacing tables, and the font table.
//!
//! A font table is stored in two passes. The first carries every record's
//! name and property bits, the second every record's spacing table, each
//! pass prefixed by the record count:
//!
//! ```text
//! i32 count | count x (string name, u32 properties)
//! i32 count | count x spacing
//!
//! spacing  := i32 entries (0 = no table) | entries x entry
//! entry    := i16 x_gap_before | i16 x_gap_after | i32 kerns
//!             (kerns < 0: no data for this char; gaps are written as -1)
//!             (kerns > 0: i32-vec kerned ids | i16-vec kerned gaps)
//! ```

use crate::error::{Result, TrainedDataError};
use crate::serial::{Deserializer, Serializable, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::{Read, Write};
use std::ops::Deref;

/// Style bits of a font, as stored in the `properties` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontProperties(pub u32);

impl FontProperties {
    pub const ITALIC: FontProperties = FontProperties(1);
    pub const BOLD: FontProperties = FontProperties(2);
    pub const FIXED_PITCH: FontProperties = FontProperties(4);
    pub const SERIF: FontProperties = FontProperties(8);
    pub const FRAKTUR: FontProperties = FontProperties(16);

    /// Flags in the column order of the `font_properties` text format
    const COLUMNS: [FontProperties; 5] = [
        Self::ITALIC,
        Self::BOLD,
        Self::FIXED_PITCH,
        Self::SERIF,
        Self::FRAKTUR,
    ];

    pub const fn empty() -> Self {
        FontProperties(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: FontProperties) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: FontProperties) {
        self.0 |= other.0;
    }

    pub fn is_italic(self) -> bool {
        self.contains(Self::ITALIC)
    }

    pub fn is_bold(self) -> bool {
        self.contains(Self::BOLD)
    }

    pub fn is_fixed_pitch(self) -> bool {
        self.contains(Self::FIXED_PITCH)
    }

    pub fn is_serif(self) -> bool {
        self.contains(Self::SERIF)
    }

    pub fn is_fraktur(self) -> bool {
        self.contains(Self::FRAKTUR)
    }
}

impl std::ops::BitOr for FontProperties {
    type Output = FontProperties;

    fn bitor(self, rhs: FontProperties) -> FontProperties {
        FontProperties(self.0 | rhs.0)
    }
}

/// Horizontal spacing data for one character of one font
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontSpacingInfo {
    pub x_gap_before: i16,
    pub x_gap_after: i16,
    /// Characters that kern against this one when they follow it
    pub kerned_unichar_ids: Vec<i32>,
    /// Gap to each of `kerned_unichar_ids`, index for index
    pub kerned_x_gaps: Vec<i16>,
}

impl FontSpacingInfo {
    pub fn new(x_gap_before: i16, x_gap_after: i16) -> Self {
        Self {
            x_gap_before,
            x_gap_after,
            ..Self::default()
        }
    }

    pub fn with_kerning(mut self, unichar_id: i32, gap: i16) -> Self {
        self.kerned_unichar_ids.push(unichar_id);
        self.kerned_x_gaps.push(gap);
        self
    }

    /// Gap before `unichar_id` when it follows this character, if kerned
    pub fn kerned_gap(&self, unichar_id: i32) -> Option<i16> {
        self.kerned_unichar_ids
            .iter()
            .position(|&id| id == unichar_id)
            .and_then(|i| self.kerned_x_gaps.get(i).copied())
    }
}

/// One font: its name, style bits, and optional spacing table indexed by
/// character id.
///
/// Tables identify fonts by name alone; properties are assumed to agree for
/// equal names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontInfo {
    pub name: String,
    pub properties: FontProperties,
    spacing: Option<Vec<Option<FontSpacingInfo>>>,
}

impl FontInfo {
    pub fn new(name: impl Into<String>, properties: FontProperties) -> Self {
        Self {
            name: name.into(),
            properties,
            spacing: None,
        }
    }

    /// Reserve an empty spacing table for `size` character ids, replacing any
    /// existing one. A zero size leaves the font without a table.
    pub fn init_spacing(&mut self, size: usize) {
        self.spacing = (size > 0).then(|| vec![None; size]);
    }

    /// Store spacing data for `unichar_id`.
    ///
    /// Panics if [`FontInfo::init_spacing`] did not reserve that id.
    pub fn add_spacing(&mut self, unichar_id: usize, info: FontSpacingInfo) {
        let table = self
            .spacing
            .as_mut()
            .filter(|table| unichar_id < table.len());
        assert!(
            table.is_some(),
            "spacing for unichar id {} of font {} was never reserved",
            unichar_id,
            self.name
        );
        if let Some(table) = table {
            table[unichar_id] = Some(info);
        }
    }

    pub fn has_spacing(&self) -> bool {
        self.spacing.is_some()
    }

    /// Number of character ids the spacing table covers
    pub fn spacing_len(&self) -> usize {
        self.spacing.as_ref().map_or(0, Vec::len)
    }

    pub fn spacing_info(&self, unichar_id: usize) -> Option<&FontSpacingInfo> {
        self.spacing.as_ref()?.get(unichar_id)?.as_ref()
    }

    /// Take the spacing table, leaving the font without one
    pub fn take_spacing(&mut self) -> Option<Vec<Option<FontSpacingInfo>>> {
        self.spacing.take()
    }

    pub fn set_spacing(&mut self, spacing: Option<Vec<Option<FontSpacingInfo>>>) {
        self.spacing = spacing.filter(|table| !table.is_empty());
    }

    /// Horizontal gap between `prev_id` and a following `unichar_id`.
    ///
    /// Uses the kerning pair if `prev_id` lists `unichar_id`, otherwise the
    /// sum of `prev_id`'s after-gap and `unichar_id`'s before-gap. `None`
    /// when either character has no spacing data.
    pub fn spacing_between(&self, prev_id: usize, unichar_id: usize) -> Option<i32> {
        let prev = self.spacing_info(prev_id)?;
        let cur = self.spacing_info(unichar_id)?;
        let kerned = i32::try_from(unichar_id)
            .ok()
            .and_then(|id| prev.kerned_gap(id));
        Some(match kerned {
            Some(gap) => i32::from(gap),
            None => i32::from(prev.x_gap_after) + i32::from(cur.x_gap_before),
        })
    }

    fn write_info<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        out.write_string(&self.name)?;
        out.write(self.properties.bits())
    }

    fn read_info<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        let name = input.read_string("font name")?;
        let properties = FontProperties(input.read()?);
        Ok(Self::new(name, properties))
    }

    fn write_spacing<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        let Some(table) = &self.spacing else {
            return out.write_len("spacing table", 0);
        };
        out.write_len("spacing table", table.len())?;
        for entry in table {
            match entry {
                None => {
                    out.write(-1i16)?;
                    out.write(-1i16)?;
                    out.write(-1i32)?;
                }
                Some(info) => {
                    if info.kerned_unichar_ids.len() != info.kerned_x_gaps.len() {
                        return Err(TrainedDataError::InvalidFormat(format!(
                            "Font {}: {} kerned ids but {} kerned gaps",
                            self.name,
                            info.kerned_unichar_ids.len(),
                            info.kerned_x_gaps.len()
                        )));
                    }
                    out.write(info.x_gap_before)?;
                    out.write(info.x_gap_after)?;
                    out.write_len("kerning pairs", info.kerned_unichar_ids.len())?;
                    if !info.kerned_unichar_ids.is_empty() {
                        out.write_vec(&info.kerned_unichar_ids)?;
                        out.write_vec(&info.kerned_x_gaps)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn read_spacing<R: Read>(&mut self, input: &mut Deserializer<R>) -> Result<()> {
        let size = input.read_len("spacing table")?;
        // `size` is untrusted: grow per entry.
        let mut table = Vec::with_capacity(size.min(1024));
        for _ in 0..size {
            let x_gap_before: i16 = input.read()?;
            let x_gap_after: i16 = input.read()?;
            let Some(kerns) = input.read_len_or_absent("kerning pairs")? else {
                table.push(None);
                continue;
            };

            let mut info = FontSpacingInfo::new(x_gap_before, x_gap_after);
            if kerns > 0 {
                info.kerned_unichar_ids = input.read_vec("kerned unichar ids")?;
                info.kerned_x_gaps = input.read_vec("kerned gaps")?;
                if info.kerned_unichar_ids.len() != kerns || info.kerned_x_gaps.len() != kerns {
                    return Err(TrainedDataError::InvalidFormat(format!(
                        "Font {}: kerning count {} disagrees with stored pairs",
                        self.name, kerns
                    )));
                }
            }
            table.push(Some(info));
        }
        self.set_spacing(Some(table));
        Ok(())
    }
}

/// Ordered font records with unique names; a font's id is its index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontInfoTable {
    fonts: Vec<FontInfo>,
}

impl FontInfoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&FontInfo> {
        self.fonts.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut FontInfo> {
        self.fonts.get_mut(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FontInfo> {
        self.fonts.iter()
    }

    /// Id of the font called `name`
    pub fn get_index(&self, name: &str) -> Option<usize> {
        self.fonts.iter().position(|font| font.name == name)
    }

    /// Add a font, or return the id of the existing font with the same name
    /// (whose record is kept as is)
    pub fn push(&mut self, font: FontInfo) -> usize {
        match self.get_index(&font.name) {
            Some(id) => id,
            None => {
                self.fonts.push(font);
                self.fonts.len() - 1
            }
        }
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
    }

    /// Whether any font in `font_set` has the same properties as `font_id`
    pub fn set_contains_font_properties(&self, font_id: usize, font_set: &[i32]) -> bool {
        let Some(properties) = self.get(font_id).map(|font| font.properties) else {
            return false;
        };
        self.fonts_of(font_set)
            .any(|font| font.properties == properties)
    }

    /// Whether `font_set` mixes fonts with differing properties
    pub fn set_contains_multiple_font_properties(&self, font_set: &[i32]) -> bool {
        let mut fonts = self.fonts_of(font_set);
        let Some(first) = fonts.next().map(|font| font.properties) else {
            return false;
        };
        fonts.any(|font| font.properties != first)
    }

    fn fonts_of<'a>(&'a self, font_set: &'a [i32]) -> impl Iterator<Item = &'a FontInfo> + 'a {
        font_set
            .iter()
            .filter_map(|&id| usize::try_from(id).ok())
            .filter_map(|id| self.get(id))
    }

    /// Take every spacing table from `other`.
    ///
    /// A donor font already present here has its spacing table replace this
    /// table's; a donor font not present is moved in whole. Donor fonts
    /// without spacing are ignored. Afterwards no font in `other` carries a
    /// spacing table.
    pub fn move_spacing_info_from(&mut self, other: &mut FontInfoTable) {
        let mut ids = self.name_ids();
        for donor in &mut other.fonts {
            let Some(spacing) = donor.take_spacing() else {
                continue;
            };
            match ids.get(&donor.name) {
                Some(&id) => self.fonts[id].spacing = Some(spacing),
                None => {
                    let mut font = FontInfo::new(std::mem::take(&mut donor.name), donor.properties);
                    font.spacing = Some(spacing);
                    ids.insert(font.name.clone(), self.fonts.len());
                    self.fonts.push(font);
                }
            }
        }
    }

    /// Name to id of the first font with that name
    fn name_ids(&self) -> HashMap<String, usize> {
        let mut ids = HashMap::with_capacity(self.fonts.len());
        for (id, font) in self.fonts.iter().enumerate() {
            ids.entry(font.name.clone()).or_insert(id);
        }
        ids
    }

    /// Move every record into `target`, replacing its contents and leaving
    /// this table empty
    pub fn move_to(&mut self, target: &mut FontInfoTable) {
        target.fonts = std::mem::take(&mut self.fonts);
    }

    /// Parse the `font_properties` text format: one font per line,
    /// `name italic bold fixed serif fraktur` with 0/1 flags.
    ///
    /// Blank lines are skipped. Repeated names keep the first definition.
    pub fn parse_font_properties(text: &str) -> Result<Self> {
        let mut table = Self::new();
        let mut seen = HashSet::new();
        for (line_no, line) in text.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            let bad_line = || {
                TrainedDataError::InvalidFormat(format!(
                    "font_properties line {}: expected a name and 5 flags, got {:?}",
                    line_no + 1,
                    line
                ))
            };
            if fields.len() != 1 + FontProperties::COLUMNS.len() {
                return Err(bad_line());
            }

            let mut properties = FontProperties::empty();
            for (flag, field) in FontProperties::COLUMNS.iter().zip(&fields[1..]) {
                match *field {
                    "0" => {}
                    "1" => properties.insert(*flag),
                    _ => return Err(bad_line()),
                }
            }
            if !seen.insert(fields[0]) {
                tracing::warn!(font = fields[0], line = line_no + 1, "Duplicate font in font_properties");
                continue;
            }
            table.fonts.push(FontInfo::new(fields[0], properties));
        }
        Ok(table)
    }

    /// Render in the `font_properties` text format
    pub fn to_font_properties(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FontInfoTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for font in &self.fonts {
            write!(f, "{}", font.name)?;
            for flag in FontProperties::COLUMNS {
                write!(f, " {}", u8::from(font.properties.contains(flag)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FontInfoTable {
    type Item = &'a FontInfo;
    type IntoIter = std::slice::Iter<'a, FontInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.fonts.iter()
    }
}

impl Serializable for FontInfoTable {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        out.write_len("font table", self.fonts.len())?;
        for font in &self.fonts {
            font.write_info(out)?;
        }
        out.write_len("font table", self.fonts.len())?;
        for font in &self.fonts {
            font.write_spacing(out)?;
        }
        Ok(())
    }

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        let count = input.read_len("font table")?;
        let mut table = Self::new();
        let mut seen = HashSet::new();
        for _ in 0..count {
            let font = FontInfo::read_info(input)?;
            if !seen.insert(font.name.clone()) {
                return Err(TrainedDataError::DuplicateFont(font.name));
            }
            table.fonts.push(font);
        }

        let spacing_count = input.read_len("font spacing table")?;
        if spacing_count != count {
            return Err(TrainedDataError::InvalidFormat(format!(
                "Font table has {} records but {} spacing entries",
                count, spacing_count
            )));
        }
        for font in &mut table.fonts {
            font.read_spacing(input)?;
        }
        Ok(table)
    }
}

/// Ids of the fonts a shape was trained on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FontSet(pub Vec<i32>);

impl FontSet {
    pub fn new(ids: Vec<i32>) -> Self {
        Self(ids)
    }
}

impl Deref for FontSet {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.0
    }
}

impl Serializable for FontSet {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        out.write_vec(&self.0)
    }

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        Ok(Self(input.read_vec("font set")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_font() -> FontInfo {
        let mut font = FontInfo::new("Arial", FontProperties::BOLD | FontProperties::SERIF);
        font.init_spacing(4);
        font.add_spacing(0, FontSpacingInfo::new(1, 2).with_kerning(2, -3));
        font.add_spacing(2, FontSpacingInfo::new(4, 5));
        font.add_spacing(3, FontSpacingInfo::new(0, 0));
        font
    }

    #[test]
    fn test_properties_bits() {
        let props = FontProperties::ITALIC | FontProperties::FRAKTUR;
        assert_eq!(props.bits(), 17);
        assert!(props.is_italic());
        assert!(props.is_fraktur());
        assert!(!props.is_bold());
    }

    #[test]
    fn test_spacing_between() {
        let font = sample_font();
        // Kerned pair wins over the sum of gaps.
        assert_eq!(font.spacing_between(0, 2), Some(-3));
        assert_eq!(font.spacing_between(2, 3), Some(5));
        // Char 1 has no spacing data.
        assert_eq!(font.spacing_between(0, 1), None);
        assert_eq!(font.spacing_between(0, 99), None);
    }

    #[test]
    #[should_panic(expected = "never reserved")]
    fn test_add_spacing_unreserved_panics() {
        let mut font = FontInfo::new("Arial", FontProperties::empty());
        font.init_spacing(2);
        font.add_spacing(2, FontSpacingInfo::default());
    }

    #[test]
    fn test_init_spacing_zero_is_none() {
        let mut font = FontInfo::new("Arial", FontProperties::empty());
        font.init_spacing(0);
        assert!(!font.has_spacing());
    }

    #[test]
    fn test_push_dedupes_names() {
        let mut table = FontInfoTable::new();
        assert_eq!(table.push(FontInfo::new("a", FontProperties::empty())), 0);
        assert_eq!(table.push(FontInfo::new("b", FontProperties::BOLD)), 1);
        assert_eq!(table.push(FontInfo::new("a", FontProperties::ITALIC)), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().properties, FontProperties::empty());
    }

    #[test]
    fn test_table_roundtrip() {
        let mut table = FontInfoTable::new();
        table.push(sample_font());
        table.push(FontInfo::new("Courier", FontProperties::FIXED_PITCH));

        let bytes = table.to_bytes().unwrap();
        let decoded = FontInfoTable::from_bytes(&bytes, false).unwrap();
        assert_eq!(decoded, table);
        assert_eq!(decoded.get(0).unwrap().spacing_info(1), None);
        assert_eq!(
            decoded.get(0).unwrap().spacing_info(0).unwrap().kerned_x_gaps,
            vec![-3]
        );
    }

    #[test]
    fn test_empty_table_roundtrip() {
        let table = FontInfoTable::new();
        let bytes = table.to_bytes().unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(FontInfoTable::from_bytes(&bytes, false).unwrap(), table);
    }

    #[test]
    fn test_swapped_roundtrip() {
        let mut table = FontInfoTable::new();
        table.push(sample_font());
        let mut ser = Serializer::swapped(Vec::new());
        table.serialize(&mut ser).unwrap();
        assert_eq!(FontInfoTable::from_bytes(&ser.into_inner(), true).unwrap(), table);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut ser = Serializer::new(Vec::new());
        ser.write(2i32).unwrap();
        for _ in 0..2 {
            ser.write_string("Dup").unwrap();
            ser.write(0u32).unwrap();
        }
        ser.write(2i32).unwrap();
        ser.write(0i32).unwrap();
        ser.write(0i32).unwrap();
        let err = FontInfoTable::from_bytes(&ser.into_inner(), false).unwrap_err();
        assert!(matches!(err, TrainedDataError::DuplicateFont(name) if name == "Dup"));
    }

    #[test]
    fn test_mismatched_pass_counts_rejected() {
        let mut ser = Serializer::new(Vec::new());
        ser.write(1i32).unwrap();
        ser.write_string("A").unwrap();
        ser.write(0u32).unwrap();
        ser.write(2i32).unwrap();
        let err = FontInfoTable::from_bytes(&ser.into_inner(), false).unwrap_err();
        assert!(matches!(err, TrainedDataError::InvalidFormat(_)));
    }

    #[test]
    fn test_truncated_spacing_rejected() {
        let mut table = FontInfoTable::new();
        table.push(sample_font());
        let bytes = table.to_bytes().unwrap();
        let err = FontInfoTable::from_bytes(&bytes[..bytes.len() - 1], false).unwrap_err();
        assert!(matches!(err, TrainedDataError::Truncated(_)));
    }

    #[test]
    fn test_move_spacing_info_from_merges_by_name() {
        let mut target = FontInfoTable::new();
        target.push(FontInfo::new("Arial", FontProperties::BOLD | FontProperties::SERIF));
        target.push(FontInfo::new("Times", FontProperties::SERIF));

        let mut donor = FontInfoTable::new();
        donor.push(sample_font());
        donor.push(FontInfo::new("Times", FontProperties::SERIF));
        let mut extra = FontInfo::new("Mono", FontProperties::FIXED_PITCH);
        extra.init_spacing(1);
        extra.add_spacing(0, FontSpacingInfo::new(7, 7));
        donor.push(extra);

        target.move_spacing_info_from(&mut donor);

        assert_eq!(target.len(), 3);
        let arial = target.get(target.get_index("Arial").unwrap()).unwrap();
        assert_eq!(arial.spacing_len(), 4);
        assert!(!target.get(1).unwrap().has_spacing());
        assert_eq!(target.get(2).unwrap().name, "Mono");
        assert!(donor.iter().all(|font| !font.has_spacing()));
    }

    #[test]
    fn test_move_to_replaces_target() {
        let mut source = FontInfoTable::new();
        source.push(sample_font());
        let mut target = FontInfoTable::new();
        target.push(FontInfo::new("Old", FontProperties::empty()));

        source.move_to(&mut target);
        assert!(source.is_empty());
        assert_eq!(target.len(), 1);
        assert_eq!(target.get(0).unwrap().name, "Arial");
        assert!(target.get(0).unwrap().has_spacing());
    }

    #[test]
    fn test_font_set_property_queries() {
        let mut table = FontInfoTable::new();
        table.push(FontInfo::new("a", FontProperties::BOLD));
        table.push(FontInfo::new("b", FontProperties::BOLD));
        table.push(FontInfo::new("c", FontProperties::ITALIC));

        assert!(table.set_contains_font_properties(0, &[1]));
        assert!(!table.set_contains_font_properties(2, &[0, 1]));
        assert!(!table.set_contains_multiple_font_properties(&[0, 1]));
        assert!(table.set_contains_multiple_font_properties(&[0, 2]));
        assert!(!table.set_contains_multiple_font_properties(&[]));
        // Unknown ids are ignored.
        assert!(!table.set_contains_multiple_font_properties(&[0, -1, 42]));
    }

    #[test]
    fn test_parse_font_properties() {
        let text = "Arial 0 1 0 0 0\n\nTimes_Italic 1 0 0 1 0\n";
        let table = FontInfoTable::parse_font_properties(text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().properties, FontProperties::BOLD);
        assert_eq!(
            table.get(1).unwrap().properties,
            FontProperties::ITALIC | FontProperties::SERIF
        );
        assert_eq!(table.to_font_properties(), "Arial 0 1 0 0 0\nTimes_Italic 1 0 0 1 0\n");
    }

    #[test]
    fn test_parse_font_properties_rejects_bad_lines() {
        assert!(FontInfoTable::parse_font_properties("Arial 0 1 0").is_err());
        assert!(FontInfoTable::parse_font_properties("Arial 0 1 0 0 2").is_err());
    }

    #[test]
    fn test_font_set_roundtrip() {
        let set = FontSet::new(vec![0, 3, 7]);
        let bytes = set.to_bytes().unwrap();
        assert_eq!(FontSet::from_bytes(&bytes, false).unwrap(), set);
        assert_eq!(set.len(), 3);
    }
}
