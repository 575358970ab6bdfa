//! Fixed-width values the codec can encode.

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width value with a little-endian encoding.
///
/// Implemented for `u8`, `u32`, `u64`, `i32`, `i64`, `f32`, and `f64`.
/// Sealed: the wire format is closed.
pub trait Primitive: sealed::Sealed + Copy {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Write `self` into `out`, which is exactly `WIDTH` bytes.
    fn encode(self, out: &mut [u8]);

    /// Decode from `bytes`, which is exactly `WIDTH` bytes.
    fn decode(bytes: &[u8]) -> Self;
}

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn encode(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn decode(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_primitive!(u8, u32, u64, i32, i64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_types() {
        assert_eq!(u8::WIDTH, 1);
        assert_eq!(u32::WIDTH, 4);
        assert_eq!(u64::WIDTH, 8);
        assert_eq!(i32::WIDTH, 4);
        assert_eq!(i64::WIDTH, 8);
        assert_eq!(f32::WIDTH, 4);
        assert_eq!(f64::WIDTH, 8);
    }

    #[test]
    fn encoding_is_little_endian() {
        let mut out = [0u8; 4];
        0x0102_0304u32.encode(&mut out);
        assert_eq!(out, [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(u32::decode(&out), 0x0102_0304);
    }

    #[test]
    fn float_bits_survive() {
        let mut out = [0u8; 8];
        f64::NEG_INFINITY.encode(&mut out);
        assert_eq!(f64::decode(&out), f64::NEG_INFINITY);
    }
}
