//! # Keel Serde
//! Bit-level writer/reader pair and the fixed-width integer type the keel
//! codecs are built on.

mod bit_reader;
mod bit_writer;
mod error;
mod integer;
mod serde;

pub use bit_reader::BitReader;
pub use bit_writer::BitWriter;
pub use error::SerdeErr;
pub use integer::{SerdeInteger, SignedInteger, UnsignedInteger};
pub use serde::Serde;
