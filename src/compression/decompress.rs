use log::{debug, error, info, trace};

use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};
use crate::tools::cli::{HuffOpts, Mode};
use crate::tools::files::{finish_input, read_input, report_ratio, write_output};

use super::header::Header;

/// Decompress a buffer produced by compress.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let (header, used) = Header::read(input)?;
    debug!(
        "Header is {} bytes: {} codes, {} padding bits.",
        used,
        header.table.len(),
        header.padding
    );
    unpack(&input[used..], &header.table, header.padding)
}

/// Decode a packed payload. Bits are gathered one at a time until they spell a
/// code; the matching byte is emitted and gathering starts over. The padding
/// bits at the end are never read, and every bit before them must belong to a
/// complete code.
pub fn unpack(payload: &[u8], table: &CodeTable, padding: u8) -> Result<Vec<u8>> {
    if padding > 7 {
        return Err(HuffError::malformed(format!(
            "padding count {} is larger than 7",
            padding
        )));
    }
    if table.is_empty() {
        if !payload.is_empty() || padding != 0 {
            return Err(HuffError::malformed(format!(
                "empty code table but {} payload bytes and {} padding bits",
                payload.len(),
                padding
            )));
        }
        return Ok(Vec::new());
    }
    if payload.is_empty() {
        return Err(HuffError::malformed("code table present but payload is empty"));
    }

    let reverse = table
        .reverse()
        .ok_or_else(|| HuffError::malformed("two bytes share a code"))?;
    let longest = table.iter().map(|(_, code)| code.len()).max().unwrap_or(0);

    let bit_count = payload.len() * 8 - padding as usize;
    let mut br = BitReader::with_limit(payload, bit_count);
    let mut result = Vec::with_capacity(payload.len() * 2);
    let mut pending = Code::new();

    while let Some(bit) = br.bit() {
        pending.push(bit);
        if let Some(&byte) = reverse.get(&pending) {
            result.push(byte);
            pending.clear();
        } else if pending.len() >= longest {
            error!("No code matches {} ending at {}.", pending, br.loc());
            return Err(HuffError::mismatch(format!(
                "bits {} ending at bit {} match no code",
                pending,
                br.bit_pos()
            )));
        }
    }

    if !pending.is_empty() {
        return Err(HuffError::mismatch(format!(
            "{} bits left unmatched at the end of the payload",
            pending.len()
        )));
    }
    trace!("Decoded {} bits into {} bytes.", bit_count, result.len());
    Ok(result)
}

/// Decompress the input defined in opts. In test mode the result is checked
/// but nothing is written and the input is left alone.
pub fn decompress_file(opts: &HuffOpts) -> Result<()> {
    let input = read_input(opts)?;
    let output = decompress(&input)?;
    if opts.op_mode == Mode::Test {
        info!(
            "{}: ok, {} bytes decode to {} bytes.",
            opts.file.as_deref().unwrap_or("(stdin)"),
            input.len(),
            output.len()
        );
        return Ok(());
    }
    report_ratio(input.len(), output.len());
    write_output(opts, &output)?;
    finish_input(opts)?;
    info!("Decompression done.");
    Ok(())
}
