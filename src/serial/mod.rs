//! Swap-aware binary codec shared by every persisted component value.
//!
//! Values are written in host byte order. A reader decides once per archive
//! or file whether the producer had the opposite byte order and threads that
//! `swap` flag through every nested decode.
//!
//! Layout rules:
//! - fixed-width integers and floats are raw bytes of their declared width,
//!   with no padding
//! - strings and vectors carry a signed 32-bit count before their elements
//! - nested objects are written by recursive call in declaration order
//! - an optional nested object is preceded by an `i8` marker, zero when absent

mod primitive;
mod reader;
mod writer;

pub use primitive::Primitive;
pub use reader::Deserializer;
pub use writer::Serializer;

use crate::error::Result;
use std::io::{Read, Write};

/// Upper bound on any decoded element count, to reject bad data early
pub const MAX_VECTOR_LEN: usize = 50_000_000;

/// A value with a binary encoding under the shared codec rules
pub trait Serializable: Sized {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()>;

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self>;

    /// Encode into a fresh buffer in host byte order
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut ser = Serializer::new(Vec::new());
        self.serialize(&mut ser)?;
        Ok(ser.into_inner())
    }

    /// Decode from the start of `bytes`; trailing bytes are left unread
    fn from_bytes(bytes: &[u8], swap: bool) -> Result<Self> {
        let mut de = Deserializer::new(bytes, swap);
        Self::deserialize(&mut de)
    }
}

impl Serializable for String {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        out.write_string(self)
    }

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        input.read_string("string")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        id: i32,
        label: String,
    }

    impl Serializable for Pair {
        fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
            out.write(self.id)?;
            out.write_string(&self.label)
        }

        fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
            Ok(Self {
                id: input.read()?,
                label: input.read_string("label")?,
            })
        }
    }

    #[test]
    fn test_optional_objects_keep_their_place() {
        let values = vec![
            Some(Pair { id: 1, label: "a".into() }),
            None,
            Some(Pair { id: 3, label: "c".into() }),
        ];

        let mut ser = Serializer::new(Vec::new());
        ser.write_optionals(&values).unwrap();
        let buf = ser.into_inner();

        let mut de = Deserializer::new(&buf[..], false);
        let decoded: Vec<Option<Pair>> = de.read_optionals("pairs").unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_absent_optional_is_single_zero_byte() {
        let mut ser = Serializer::new(Vec::new());
        ser.write_optional::<Pair>(None).unwrap();
        assert_eq!(ser.into_inner(), vec![0u8]);
    }

    #[test]
    fn test_swap_threads_through_nested_objects() {
        let values = vec![Pair { id: -40, label: "x".into() }, Pair { id: 9, label: "yz".into() }];

        let mut ser = Serializer::swapped(Vec::new());
        ser.write_objects(&values).unwrap();
        let buf = ser.into_inner();

        let mut de = Deserializer::new(&buf[..], true);
        assert_eq!(de.read_objects::<Pair>("pairs").unwrap(), values);
    }

    #[test]
    fn test_truncated_nested_object_fails() {
        let pair = Pair { id: 5, label: "hello".into() };
        let bytes = pair.to_bytes().unwrap();
        assert!(Pair::from_bytes(&bytes[..bytes.len() - 1], false).is_err());
    }
}
