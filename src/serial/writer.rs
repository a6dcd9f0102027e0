use crate::error::{Result, TrainedDataError};
use crate::serial::primitive::Primitive;
use crate::serial::{Serializable, MAX_VECTOR_LEN};
use std::io::Write;

/// Write half of the binary codec.
///
/// Writes host byte order unless constructed with [`Serializer::swapped`],
/// which produces the bytes a host of the opposite endianness would write.
pub struct Serializer<W: Write> {
    inner: W,
    swap: bool,
    bytes_written: u64,
}

impl<W: Write> Serializer<W> {
    /// Serializer writing host byte order
    pub fn new(inner: W) -> Self {
        Self::with_swap(inner, false)
    }

    /// Serializer writing the opposite of host byte order
    pub fn swapped(inner: W) -> Self {
        Self::with_swap(inner, true)
    }

    pub fn with_swap(inner: W, swap: bool) -> Self {
        Self {
            inner,
            swap,
            bytes_written: 0,
        }
    }

    /// Whether multi-byte values are byte-reversed relative to the host
    pub fn is_swapped(&self) -> bool {
        self.swap
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write raw bytes with no length prefix
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    pub fn write<T: Primitive>(&mut self, value: T) -> Result<()> {
        let mut buf = [0u8; 8];
        value.encode(&mut buf[..T::WIDTH], self.swap);
        self.write_bytes(&buf[..T::WIDTH])
    }

    /// Write a run of values with no length prefix
    pub fn write_slice<T: Primitive>(&mut self, values: &[T]) -> Result<()> {
        let mut buf = vec![0u8; values.len() * T::WIDTH];
        for (value, chunk) in values.iter().zip(buf.chunks_exact_mut(T::WIDTH)) {
            value.encode(chunk, self.swap);
        }
        self.write_bytes(&buf)
    }

    /// Write a signed 32-bit element count
    pub fn write_len(&mut self, what: &'static str, len: usize) -> Result<()> {
        if len > MAX_VECTOR_LEN {
            return Err(TrainedDataError::InvalidLength {
                what,
                len: len as i64,
            });
        }
        self.write(len as i32)
    }

    /// Length-prefixed vector of primitives
    pub fn write_vec<T: Primitive>(&mut self, values: &[T]) -> Result<()> {
        self.write_len("vector", values.len())?;
        self.write_slice(values)
    }

    /// Length-prefixed string (no terminator)
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_len("string", value.len())?;
        self.write_bytes(value.as_bytes())
    }

    pub fn write_object<S: Serializable>(&mut self, value: &S) -> Result<()> {
        value.serialize(self)
    }

    /// Length-prefixed vector of nested objects, in order
    pub fn write_objects<S: Serializable>(&mut self, values: &[S]) -> Result<()> {
        self.write_len("object vector", values.len())?;
        for value in values {
            value.serialize(self)?;
        }
        Ok(())
    }

    /// Optional nested object: a zero marker byte when absent
    pub fn write_optional<S: Serializable>(&mut self, value: Option<&S>) -> Result<()> {
        match value {
            Some(value) => {
                self.write(1i8)?;
                value.serialize(self)
            }
            None => self.write(0i8),
        }
    }

    /// Length-prefixed vector whose elements may individually be absent
    pub fn write_optionals<S: Serializable>(&mut self, values: &[Option<S>]) -> Result<()> {
        self.write_len("optional vector", values.len())?;
        for value in values {
            self.write_optional(value.as_ref())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_primitives_native() {
        let mut ser = Serializer::new(Vec::new());
        ser.write(7u8).unwrap();
        ser.write(-2i16).unwrap();
        ser.write(1.5f32).unwrap();
        assert_eq!(ser.bytes_written(), 7);

        let buf = ser.into_inner();
        assert_eq!(buf[0], 7);
        assert_eq!(&buf[1..3], &(-2i16).to_ne_bytes());
        assert_eq!(&buf[3..7], &1.5f32.to_ne_bytes());
    }

    #[test]
    fn test_swapped_writes_reverse_each_field() {
        let mut ser = Serializer::swapped(Vec::new());
        ser.write_vec(&[0x0102u16, 0x0304]).unwrap();
        let buf = ser.into_inner();

        let mut count = 2i32.to_ne_bytes();
        count.reverse();
        assert_eq!(&buf[..4], &count);
        let mut first = 0x0102u16.to_ne_bytes();
        first.reverse();
        assert_eq!(&buf[4..6], &first);
    }

    #[test]
    fn test_write_string_has_no_terminator() {
        let mut ser = Serializer::new(Vec::new());
        ser.write_string("abc").unwrap();
        let buf = ser.into_inner();
        assert_eq!(buf.len(), 4 + 3);
        assert_eq!(&buf[4..], b"abc");
    }

    #[test]
    fn test_write_len_rejects_oversized() {
        let mut ser = Serializer::new(Vec::new());
        let err = ser.write_len("vector", MAX_VECTOR_LEN + 1).unwrap_err();
        assert!(matches!(err, TrainedDataError::InvalidLength { .. }));
    }
}
