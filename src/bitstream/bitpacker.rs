use log::{debug, error, trace};

use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};

/// Packs prefix codes into bytes, most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Zero bits added by the last flush to reach a byte boundary.
    pub padding: u8,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the capacity specified. Call
    /// flush() to push the last partial byte out before reading the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            padding: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Move every complete byte from the queue to the output.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        if self.q_bits > 7 {
            self.write_stream();
        }
    }

    /// Puts every bit of a code on the stream, in order.
    pub fn out_code(&mut self, code: &Code) {
        code.bits().iter().for_each(|&bit| self.out_bit(bit));
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// significant bits. Returns the number of padding bits added.
    pub fn flush(&mut self) -> u8 {
        self.padding = 0;
        if self.q_bits > 0 {
            self.padding = 8 - self.q_bits;
            self.queue <<= self.padding; //pad the queue with zeros
            self.q_bits += self.padding;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
        self.padding
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]",((self.output.len() * 8) + self.q_bits as usize)/8, ((self.output.len() * 8) + self.q_bits as usize)%8}
    }
}

/// Encode every byte of data with its code and return the packed payload with
/// the number of padding bits at its end. A byte missing from the table is a
/// DecodeMismatch.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<(Vec<u8>, u8)> {
    let mut bp = BitPacker::new(data.len());
    for (idx, &byte) in data.iter().enumerate() {
        let code = table.get(byte).ok_or_else(|| {
            HuffError::mismatch(format!("byte {:#04x} at offset {} has no code", byte, idx))
        })?;
        bp.out_code(code);
    }
    trace!("Packed all codes, stream at {}.", bp.loc());
    let padding = bp.flush();
    debug!(
        "Packed {} bytes into {} bytes with {} padding bits.",
        data.len(),
        bp.output.len(),
        padding
    );
    Ok((bp.output, padding))
}
