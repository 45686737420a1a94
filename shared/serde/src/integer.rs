use crate::{bit_reader::BitReader, bit_writer::BitWriter, error::SerdeErr, serde::Serde};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, BITS>;
pub type SignedInteger<const BITS: u8> = SerdeInteger<true, BITS>;

/// Fixed-width integer. Signed values are written as a sign bit followed by
/// `BITS` bits of magnitude, so the representable range is symmetric:
/// `-(2^BITS - 1)..=(2^BITS - 1)`.
// This outer generic type wraps an inner type that is not generic, to reduce code bloat through monomorphization.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const SIGNED: bool, const BITS: u8> {
    inner: SerdeIntegerInner,
}

impl<const SIGNED: bool, const BITS: u8> SerdeInteger<SIGNED, BITS> {
    /// Largest magnitude this width can carry
    pub const MAX_MAGNITUDE: i64 = (1_i64 << BITS) - 1;

    /// Creates an integer, clamping `value` into the representable range
    pub fn saturating<T: Into<i64>>(value: T) -> Self {
        Self {
            inner: SerdeIntegerInner::saturating(SIGNED, BITS, value.into()),
        }
    }

    pub fn get(&self) -> i64 {
        self.inner.get()
    }
}

impl<const SIGNED: bool, const BITS: u8> Serde for SerdeInteger<SIGNED, BITS> {
    fn ser(&self, writer: &mut BitWriter) {
        self.inner.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let inner = SerdeIntegerInner::de(reader, SIGNED, BITS)?;
        Ok(Self { inner })
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct SerdeIntegerInner {
    inner_value: i64,
    signed: bool,
    bits: u8,
}

impl SerdeIntegerInner {
    fn saturating(signed: bool, bits: u8, value: i64) -> Self {
        debug_assert!(bits > 0 && bits < 63, "integer width must be in 1..63 bits");

        let max_value: i64 = (1_i64 << bits) - 1;
        let min_value: i64 = if signed { -max_value } else { 0 };

        Self {
            inner_value: value.clamp(min_value, max_value),
            signed,
            bits,
        }
    }

    fn get(&self) -> i64 {
        self.inner_value
    }

    fn ser(&self, writer: &mut BitWriter) {
        let negative = self.inner_value < 0;
        if self.signed {
            writer.write_bit(negative);
        }

        let mut value = self.inner_value.unsigned_abs();
        for _ in 0..self.bits {
            writer.write_bit(value & 1 != 0);
            value >>= 1;
        }
    }

    fn de(reader: &mut BitReader, signed: bool, bits: u8) -> Result<Self, SerdeErr> {
        let mut negative = false;
        if signed {
            negative = reader.read_bit()?;
        }

        let mut output: u64 = 0;
        for index in 0..bits {
            if reader.read_bit()? {
                output |= 1 << index;
            }
        }

        let value = output as i64;
        Ok(Self {
            inner_value: if negative { -value } else { value },
            signed,
            bits,
        })
    }
}
