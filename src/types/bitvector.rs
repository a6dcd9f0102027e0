use crate::error::{Result, TrainedDataError};
use crate::serial::{Deserializer, Serializable, Serializer, MAX_VECTOR_LEN};
use std::io::{Read, Write};
use std::ops::{BitAndAssign, BitOrAssign, BitXorAssign};

/// Bits per storage word
const WORD_BITS: usize = 32;

/// Sentinel in [`LSB_INDEX`] for a byte with no bits set
const NO_SET_BIT: u8 = 255;

/// Index of the least significant set bit of each byte value
static LSB_INDEX: [u8; 256] = build_lsb_index();

/// Number of set bits in each byte value
static POPCOUNT: [u8; 256] = build_popcount();

const fn build_lsb_index() -> [u8; 256] {
    let mut table = [NO_SET_BIT; 256];
    let mut i = 1;
    while i < 256 {
        table[i] = (i as u8).trailing_zeros() as u8;
        i += 1;
    }
    table
}

const fn build_popcount() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = (i as u8).count_ones() as u8;
        i += 1;
    }
    table
}

/// Fixed-length packed boolean array.
///
/// Bit `i` lives in word `i / 32` at position `i % 32` (least significant
/// first). Padding bits past the length are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitVector {
    bit_len: usize,
    words: Vec<u32>,
}

impl BitVector {
    /// All-false vector of `bit_len` bits
    pub fn new(bit_len: usize) -> Self {
        Self {
            bit_len,
            words: vec![0; Self::words_for(bit_len)],
        }
    }

    fn words_for(bit_len: usize) -> usize {
        bit_len.div_ceil(WORD_BITS)
    }

    /// Discard the contents and reallocate as `bit_len` false bits
    pub fn init(&mut self, bit_len: usize) {
        *self = Self::new(bit_len);
    }

    pub fn len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Number of storage words
    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    pub fn set_all_false(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    pub fn set_all_true(&mut self) {
        self.words.iter_mut().for_each(|w| *w = u32::MAX);
        self.clear_padding();
    }

    fn clear_padding(&mut self) {
        let used = self.bit_len % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u32 << used) - 1;
            }
        }
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.bit_len,
            "bit index {} out of range for BitVector of length {}",
            index,
            self.bit_len
        );
    }

    pub fn set_bit(&mut self, index: usize) {
        self.check_index(index);
        self.words[index / WORD_BITS] |= 1 << (index % WORD_BITS);
    }

    pub fn reset_bit(&mut self, index: usize) {
        self.check_index(index);
        self.words[index / WORD_BITS] &= !(1 << (index % WORD_BITS));
    }

    pub fn set_value(&mut self, index: usize, value: bool) {
        if value {
            self.set_bit(index);
        } else {
            self.reset_bit(index);
        }
    }

    /// Value of bit `index`. Panics if out of range.
    pub fn at(&self, index: usize) -> bool {
        self.check_index(index);
        self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Value of bit `index`, or `None` if out of range
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.bit_len).then(|| self.at(index))
    }

    /// Lowest set bit, if any
    pub fn first_set_bit(&self) -> Option<usize> {
        self.find_set_bit_from(0)
    }

    /// Smallest set bit strictly greater than `prev`, or `None` at end of vector
    pub fn next_set_bit(&self, prev: usize) -> Option<usize> {
        self.find_set_bit_from(prev.checked_add(1)?)
    }

    fn find_set_bit_from(&self, start: usize) -> Option<usize> {
        if start >= self.bit_len {
            return None;
        }
        let mut word_index = start / WORD_BITS;
        // Mask off bits below `start` in the first word.
        let mut word = self.words[word_index] & (u32::MAX << (start % WORD_BITS));
        loop {
            if word != 0 {
                let mut base = word_index * WORD_BITS;
                while word & 0xff == 0 {
                    word >>= 8;
                    base += 8;
                }
                let bit = base + LSB_INDEX[(word & 0xff) as usize] as usize;
                return (bit < self.bit_len).then_some(bit);
            }
            word_index += 1;
            if word_index >= self.words.len() {
                return None;
            }
            word = self.words[word_index];
        }
    }

    /// Iterate over the indices of set bits in increasing order
    pub fn iter_set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.first_set_bit(), move |&prev| self.next_set_bit(prev))
    }

    /// Count of set bits
    pub fn num_set_bits(&self) -> usize {
        self.words
            .iter()
            .flat_map(|word| word.to_le_bytes())
            .map(|byte| POPCOUNT[byte as usize] as usize)
            .sum()
    }

    /// Clear every bit of `self` that is set in `other`
    pub fn set_subtract(&mut self, other: &BitVector) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= !b;
        }
    }
}

impl BitOrAssign<&BitVector> for BitVector {
    fn bitor_assign(&mut self, other: &BitVector) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
        self.clear_padding();
    }
}

impl BitAndAssign<&BitVector> for BitVector {
    /// Words beyond the shorter operand are left unchanged
    fn bitand_assign(&mut self, other: &BitVector) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= b;
        }
    }
}

impl BitXorAssign<&BitVector> for BitVector {
    fn bitxor_assign(&mut self, other: &BitVector) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a ^= b;
        }
        self.clear_padding();
    }
}

/// Bit length (`u32`), then the packed words.
impl Serializable for BitVector {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        let bit_len = u32::try_from(self.bit_len).map_err(|_| TrainedDataError::InvalidLength {
            what: "bit vector",
            len: self.bit_len as i64,
        })?;
        out.write(bit_len)?;
        out.write_slice(&self.words)
    }

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        let bit_len = input.read::<u32>()? as usize;
        let word_len = Self::words_for(bit_len);
        if word_len > MAX_VECTOR_LEN {
            return Err(TrainedDataError::InvalidLength {
                what: "bit vector",
                len: bit_len as i64,
            });
        }
        // A short word run (inconsistent with the declared length) fails as truncated.
        let words = input.read_slice::<u32>(word_len, "bit vector words")?;
        let mut vector = Self { bit_len, words };
        vector.clear_padding();
        Ok(vector)
    }
}
