/// Growable bit writer. Bits are packed least-significant first and the
/// last byte is padded with zeros.
#[derive(Debug, Default)]
pub struct BitWriter {
    buffer: Vec<u8>,
    bit_index: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bit(&mut self, bit: bool) {
        let offset = self.bit_index % 8;
        if offset == 0 {
            self.buffer.push(0);
        }
        if bit {
            if let Some(last) = self.buffer.last_mut() {
                *last |= 1 << offset;
            }
        }
        self.bit_index += 1;
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }
}
