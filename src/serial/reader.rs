use crate::error::{Result, TrainedDataError};
use crate::serial::primitive::Primitive;
use crate::serial::{Serializable, MAX_VECTOR_LEN};
use std::io::{self, Read};

/// Read half of the binary codec.
///
/// The swap flag is fixed when the deserializer is created (once per archive
/// or file) and applies to every nested decode made through it.
pub struct Deserializer<R: Read> {
    inner: R,
    swap: bool,
    bytes_read: u64,
}

impl<R: Read> Deserializer<R> {
    pub fn new(inner: R, swap: bool) -> Self {
        Self {
            inner,
            swap,
            bytes_read: 0,
        }
    }

    /// Whether multi-byte values are byte-reversed after reading
    pub fn is_swapped(&self) -> bool {
        self.swap
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fill `buf` completely; running out of input is a truncation
    fn fill(&mut self, buf: &mut [u8], what: &'static str) -> Result<()> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.bytes_read += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(TrainedDataError::Truncated(what))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read exactly `len` raw bytes.
    ///
    /// Grows the buffer as data arrives, so a bogus length on a short input
    /// fails as truncated without allocating the claimed size up front.
    pub fn read_bytes(&mut self, len: usize, what: &'static str) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        self.bytes_read += buf.len() as u64;
        if buf.len() != len {
            return Err(TrainedDataError::Truncated(what));
        }
        Ok(buf)
    }

    pub fn read<T: Primitive>(&mut self) -> Result<T> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf[..T::WIDTH], std::any::type_name::<T>())?;
        Ok(T::decode(&buf[..T::WIDTH], self.swap))
    }

    /// Read `count` values with no length prefix
    pub fn read_slice<T: Primitive>(&mut self, count: usize, what: &'static str) -> Result<Vec<T>> {
        let byte_len = count
            .checked_mul(T::WIDTH)
            .ok_or(TrainedDataError::InvalidLength {
                what,
                len: count as i64,
            })?;
        let bytes = self.read_bytes(byte_len, what)?;
        Ok(bytes
            .chunks_exact(T::WIDTH)
            .map(|chunk| T::decode(chunk, self.swap))
            .collect())
    }

    /// Read a signed 32-bit count. Negative and implausibly large counts fail.
    pub fn read_len(&mut self, what: &'static str) -> Result<usize> {
        match self.read_len_or_absent(what)? {
            Some(len) => Ok(len),
            None => Err(TrainedDataError::InvalidLength { what, len: -1 }),
        }
    }

    /// Read a signed 32-bit count where any negative value is the
    /// "absent" sentinel. Implausibly large counts still fail.
    pub fn read_len_or_absent(&mut self, what: &'static str) -> Result<Option<usize>> {
        let len: i32 = self.read()?;
        if len < 0 {
            return Ok(None);
        }
        let len = len as usize;
        if len > MAX_VECTOR_LEN {
            return Err(TrainedDataError::InvalidLength {
                what,
                len: len as i64,
            });
        }
        Ok(Some(len))
    }

    /// Length-prefixed vector of primitives
    pub fn read_vec<T: Primitive>(&mut self, what: &'static str) -> Result<Vec<T>> {
        let len = self.read_len(what)?;
        self.read_slice(len, what)
    }

    /// Length-prefixed UTF-8 string
    pub fn read_string(&mut self, what: &'static str) -> Result<String> {
        let len = self.read_len(what)?;
        let bytes = self.read_bytes(len, what)?;
        String::from_utf8(bytes)
            .map_err(|e| TrainedDataError::InvalidFormat(format!("Invalid UTF-8 in {}: {}", what, e)))
    }

    pub fn read_object<S: Serializable>(&mut self) -> Result<S> {
        S::deserialize(self)
    }

    /// Length-prefixed vector of nested objects
    pub fn read_objects<S: Serializable>(&mut self, what: &'static str) -> Result<Vec<S>> {
        let len = self.read_len(what)?;
        let mut values = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            values.push(S::deserialize(self)?);
        }
        Ok(values)
    }

    /// Optional nested object preceded by a presence marker byte
    pub fn read_optional<S: Serializable>(&mut self) -> Result<Option<S>> {
        let marker: i8 = self.read()?;
        if marker == 0 {
            Ok(None)
        } else {
            Ok(Some(S::deserialize(self)?))
        }
    }

    /// Length-prefixed vector whose elements may individually be absent
    pub fn read_optionals<S: Serializable>(&mut self, what: &'static str) -> Result<Vec<Option<S>>> {
        let len = self.read_len(what)?;
        let mut values = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            values.push(self.read_optional()?);
        }
        Ok(values)
    }
}
