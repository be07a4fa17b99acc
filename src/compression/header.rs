//! The self-describing header written in front of every packed payload.
//!
//! Layout, all integers four bytes little-endian:
//! `[padding][entry count]` then per entry `[byte:1][code length:4][code: one '0'/'1' per bit]`.
//! Entries follow each other with no separator; the declared length alone marks
//! where one ends.

use log::trace;

use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};

/// Longest code a Huffman tree over 256 symbols can produce.
pub const MAX_CODE_LEN: u32 = 255;
/// Most entries a table can hold, one per byte value.
pub const MAX_ENTRIES: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Zero bits at the end of the payload that carry no data (0-7).
    pub padding: u8,
    pub table: CodeTable,
}

impl Header {
    pub fn new(padding: u8, table: CodeTable) -> Self {
        Self { padding, table }
    }

    /// Size in bytes of the serialized header.
    pub fn encoded_len(&self) -> usize {
        8 + self.table.iter().map(|(_, code)| 5 + code.len()).sum::<usize>()
    }

    /// Append the serialized header to out.
    pub fn write(&self, out: &mut Vec<u8>) {
        out.reserve(self.encoded_len());
        out.extend_from_slice(&(self.padding as u32).to_le_bytes());
        out.extend_from_slice(&(self.table.len() as u32).to_le_bytes());
        for (byte, code) in self.table.iter() {
            out.push(byte);
            out.extend_from_slice(&(code.len() as u32).to_le_bytes());
            out.extend_from_slice(&code.to_ascii());
        }
    }

    /// Parse a header from the front of data. Returns the header and the number
    /// of bytes it took, which is where the payload starts.
    pub fn read(data: &[u8]) -> Result<(Header, usize)> {
        let mut cur = Cursor::new(data);

        let padding = cur.u32("padding count")?;
        if padding > 7 {
            return Err(HuffError::malformed(format!(
                "padding count {} is larger than 7",
                padding
            )));
        }

        let entries = cur.u32("entry count")?;
        if entries > MAX_ENTRIES {
            return Err(HuffError::malformed(format!(
                "entry count {} is larger than {}",
                entries, MAX_ENTRIES
            )));
        }

        let mut table = CodeTable::new();
        for entry in 0..entries {
            let byte = cur.u8("entry byte")?;
            let len = cur.u32("code length")?;
            if len == 0 || len > MAX_CODE_LEN {
                return Err(HuffError::malformed(format!(
                    "entry {} (byte {:#04x}) has code length {}",
                    entry, byte, len
                )));
            }
            let symbols = cur.take(len as usize, "code bits")?;
            let code = Code::from_ascii(symbols).ok_or_else(|| {
                HuffError::malformed(format!(
                    "entry {} (byte {:#04x}) has a code symbol other than '0' or '1'",
                    entry, byte
                ))
            })?;
            trace!("Read code {} for byte {:#04x}.", code, byte);
            if table.insert(byte, code).is_some() {
                return Err(HuffError::malformed(format!(
                    "byte {:#04x} appears twice in the table",
                    byte
                )));
            }
        }

        if !table.is_prefix_free() {
            return Err(HuffError::malformed("code table is not prefix-free"));
        }

        Ok((Header::new(padding as u8, table), cur.pos))
    }
}

/// Bounds-checked read position over the header bytes.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                HuffError::malformed(format!(
                    "truncated reading {} at offset {}: need {} bytes, {} left",
                    what,
                    self.pos,
                    n,
                    self.data.len() - self.pos
                ))
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn u32(&mut self, what: &str) -> Result<u32> {
        let bytes = self.take(4, what)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn abc_table() -> CodeTable {
        let mut table = CodeTable::new();
        table.insert(b'a', Code::from_ascii(b"0").unwrap());
        table.insert(b'b', Code::from_ascii(b"11").unwrap());
        table.insert(b'c', Code::from_ascii(b"10").unwrap());
        table
    }

    #[test]
    fn byte_layout_test() {
        let mut out = vec![];
        Header::new(7, abc_table()).write(&mut out);
        let parts: [&[u8]; 11] = [
            &7_u32.to_le_bytes(),
            &3_u32.to_le_bytes(),
            b"a",
            &1_u32.to_le_bytes(),
            b"0",
            b"b",
            &2_u32.to_le_bytes(),
            b"11",
            b"c",
            &2_u32.to_le_bytes(),
            b"10",
        ];
        let expected = parts.concat();
        assert_eq!(out, expected);
        assert_eq!(out.len(), Header::new(7, abc_table()).encoded_len());
    }

    #[test]
    fn read_back_test() {
        let header = Header::new(3, abc_table());
        let mut out = vec![];
        header.write(&mut out);
        let header_len = out.len();
        out.extend_from_slice(&[0xde, 0xad]);
        let (read, used) = Header::read(&out).unwrap();
        assert_eq!(read, header);
        assert_eq!(used, header_len);
    }

    #[test]
    fn empty_table_test() {
        let mut out = vec![];
        Header::new(0, CodeTable::new()).write(&mut out);
        assert_eq!(out, vec![0; 8]);
        let (read, used) = Header::read(&out).unwrap();
        assert!(read.table.is_empty());
        assert_eq!(read.padding, 0);
        assert_eq!(used, 8);
    }

    #[test]
    fn truncated_test() {
        let mut out = vec![];
        Header::new(1, abc_table()).write(&mut out);
        for cut in 0..out.len() {
            match Header::read(&out[..cut]) {
                Err(HuffError::MalformedHeader(_)) => {}
                other => panic!("cut at {} gave {:?}", cut, other),
            }
        }
    }

    fn expect_malformed(data: &[u8]) {
        assert!(matches!(
            Header::read(data),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    #[test]
    fn bad_padding_test() {
        let mut data = 8_u32.to_le_bytes().to_vec();
        data.extend_from_slice(&0_u32.to_le_bytes());
        expect_malformed(&data);
    }

    #[test]
    fn bad_entry_count_test() {
        let mut data = 0_u32.to_le_bytes().to_vec();
        data.extend_from_slice(&257_u32.to_le_bytes());
        expect_malformed(&data);
    }

    #[test]
    fn bad_code_length_test() {
        for len in [0_u32, 256, u32::MAX] {
            let mut data = 0_u32.to_le_bytes().to_vec();
            data.extend_from_slice(&1_u32.to_le_bytes());
            data.push(b'x');
            data.extend_from_slice(&len.to_le_bytes());
            data.extend_from_slice(b"0");
            expect_malformed(&data);
        }
    }

    #[test]
    fn bad_symbol_test() {
        let mut data = 0_u32.to_le_bytes().to_vec();
        data.extend_from_slice(&1_u32.to_le_bytes());
        data.push(b'x');
        data.extend_from_slice(&2_u32.to_le_bytes());
        data.extend_from_slice(b"0x");
        expect_malformed(&data);
    }

    #[test]
    fn duplicate_byte_test() {
        let mut data = 0_u32.to_le_bytes().to_vec();
        data.extend_from_slice(&2_u32.to_le_bytes());
        for code in [b"0", b"1"] {
            data.push(b'x');
            data.extend_from_slice(&1_u32.to_le_bytes());
            data.extend_from_slice(code);
        }
        expect_malformed(&data);
    }

    #[test]
    fn not_prefix_free_test() {
        let mut data = 0_u32.to_le_bytes().to_vec();
        data.extend_from_slice(&2_u32.to_le_bytes());
        data.push(b'x');
        data.extend_from_slice(&1_u32.to_le_bytes());
        data.extend_from_slice(b"1");
        data.push(b'y');
        data.extend_from_slice(&2_u32.to_le_bytes());
        data.extend_from_slice(b"10");
        expect_malformed(&data);
    }
}
