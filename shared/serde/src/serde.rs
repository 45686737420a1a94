use crate::{bit_reader::BitReader, bit_writer::BitWriter, error::SerdeErr};

/// A type that can be written into and read back out of a bit stream
pub trait Serde: Sized {
    fn ser(&self, writer: &mut BitWriter);

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr>;
}
