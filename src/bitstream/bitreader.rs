//! BitReader: walks a packed payload one bit at a time, most significant bit first.
//!
//! The whole payload is already in memory, so the reader borrows it instead of
//! buffering from a source. It can be limited to fewer bits than the slice holds
//! so that trailing padding is never handed out.
//!

const BIT_MASK: u8 = 0xff;

/// Reads bits from a borrowed byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
    /// Number of bits that may be read in total.
    limit: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader over every bit of the buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_limit(buffer, buffer.len() * 8)
    }

    /// Creates a new BitReader that stops after `limit` bits. The limit is capped
    /// to the size of the buffer.
    pub fn with_limit(buffer: &'a [u8], limit: usize) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
            limit: limit.min(buffer.len() * 8),
        }
    }

    /// Number of bits read so far.
    pub fn bit_pos(&self) -> usize {
        self.cursor * 8 + self.bit_index
    }

    /// Number of bits still available.
    pub fn bits_left(&self) -> usize {
        self.limit - self.bit_pos()
    }

    /// Return the next bit as a bool (true for 1), or None when the limit is reached.
    pub fn bit(&mut self) -> Option<bool> {
        if self.bit_pos() >= self.limit {
            return None;
        }
        let bit =
            (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit == 1)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.bits_left(), Some(self.bits_left()))
    }
}
