/// A fixed-width value that is written as raw bytes in a declared width.
///
/// Values are encoded in host byte order. Decoding with `swap` set reverses
/// the bytes of every multi-byte value after it is read.
pub trait Primitive: Copy + Default + PartialEq + std::fmt::Debug {
    /// Encoded width in bytes
    const WIDTH: usize;

    /// Encode into `out` (exactly `WIDTH` bytes), reversed if `swap`
    fn encode(self, out: &mut [u8], swap: bool);

    /// Decode from `bytes` (exactly `WIDTH` bytes), reversed if `swap`
    fn decode(bytes: &[u8], swap: bool) -> Self;
}

macro_rules! impl_primitive_int {
    ($($t:ty),*) => {$(
        impl Primitive for $t {
            const WIDTH: usize = std::mem::size_of::<$t>();

            fn encode(self, out: &mut [u8], swap: bool) {
                let value = if swap { self.swap_bytes() } else { self };
                out.copy_from_slice(&value.to_ne_bytes());
            }

            fn decode(bytes: &[u8], swap: bool) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(bytes);
                let value = <$t>::from_ne_bytes(buf);
                if swap { value.swap_bytes() } else { value }
            }
        }
    )*};
}

macro_rules! impl_primitive_float {
    ($($t:ty => $bits:ty),*) => {$(
        impl Primitive for $t {
            const WIDTH: usize = std::mem::size_of::<$t>();

            fn encode(self, out: &mut [u8], swap: bool) {
                self.to_bits().encode(out, swap);
            }

            fn decode(bytes: &[u8], swap: bool) -> Self {
                <$t>::from_bits(<$bits>::decode(bytes, swap))
            }
        }
    )*};
}

impl_primitive_int!(i8, u8, i16, u16, i32, u32, i64, u64);
impl_primitive_float!(f32 => u32, f64 => u64);

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Primitive>(value: T, swap: bool) -> T {
        let mut buf = vec![0u8; T::WIDTH];
        value.encode(&mut buf, swap);
        T::decode(&buf, swap)
    }

    #[test]
    fn test_widths() {
        assert_eq!(i8::WIDTH, 1);
        assert_eq!(i16::WIDTH, 2);
        assert_eq!(u32::WIDTH, 4);
        assert_eq!(i64::WIDTH, 8);
        assert_eq!(f32::WIDTH, 4);
        assert_eq!(f64::WIDTH, 8);
    }

    #[test]
    fn test_native_encoding_matches_host() {
        let mut buf = [0u8; 4];
        0x0102_0304u32.encode(&mut buf, false);
        assert_eq!(buf, 0x0102_0304u32.to_ne_bytes());
    }

    #[test]
    fn test_swapped_encoding_is_reversed() {
        let mut native = [0u8; 4];
        let mut swapped = [0u8; 4];
        0x0102_0304u32.encode(&mut native, false);
        0x0102_0304u32.encode(&mut swapped, true);
        native.reverse();
        assert_eq!(native, swapped);
    }

    #[test]
    fn test_swap_symmetry() {
        assert_eq!(roundtrip(-12345i16, true), -12345);
        assert_eq!(roundtrip(0xDEAD_BEEFu32, true), 0xDEAD_BEEF);
        assert_eq!(roundtrip(-1i64, false), -1);
        assert_eq!(roundtrip(3.5f32, true), 3.5);
        assert_eq!(roundtrip(-0.125f64, true), -0.125);
        assert_eq!(roundtrip(-7i8, true), -7);
    }
}
