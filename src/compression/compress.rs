use log::{debug, info, trace};

use crate::bitstream::bitpacker::pack;
use crate::error::Result;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::build_tree;
use crate::tools::cli::HuffOpts;
use crate::tools::files::{finish_input, read_input, report_ratio, write_output};
use crate::tools::freq_count::{distinct_symbols, freqs};

use super::header::Header;

/// Compress a buffer: count byte frequencies, build the tree and its codes,
/// pack the data, and put the header in front of the payload.
///
/// Empty input gives an eight byte header (no padding, no entries) and no payload.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let symbols = distinct_symbols(input);
    debug!(
        "Found {} distinct byte values in {} bytes.",
        symbols.len(),
        input.len()
    );

    let table = match build_tree(&symbols) {
        Some(tree) => {
            debug!(
                "Tree has {} leaves and weight {}.",
                tree.leaf_count(),
                tree.weight()
            );
            CodeTable::from_tree(&tree)
        }
        None => CodeTable::new(),
    };
    trace!(
        "Codes need {} bits in total.",
        table.encoded_bits(&freqs(input))
    );

    let (payload, padding) = pack(input, &table)?;
    let header = Header::new(padding, table);

    let mut output = Vec::with_capacity(header.encoded_len() + payload.len());
    header.write(&mut output);
    debug!(
        "Header is {} bytes, payload is {} bytes.",
        output.len(),
        payload.len()
    );
    output.extend_from_slice(&payload);
    Ok(output)
}

/// Compress the input defined in opts and write it out.
pub fn compress_file(opts: &HuffOpts) -> Result<()> {
    let input = read_input(opts)?;
    let output = compress(&input)?;
    report_ratio(input.len(), output.len());
    write_output(opts, &output)?;
    finish_input(opts)?;
    info!("Compression done.");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitstream::bitreader::BitReader;

    #[test]
    fn empty_input_test() {
        let out = compress(&[]).unwrap();
        assert_eq!(out, vec![0; 8]);
        let (header, used) = Header::read(&out).unwrap();
        assert!(header.table.is_empty());
        assert_eq!(header.padding, 0);
        assert_eq!(used, out.len());
    }

    #[test]
    fn single_value_test() {
        let out = compress(&[0x41; 100]).unwrap();
        let (header, used) = Header::read(&out).unwrap();
        assert_eq!(header.table.len(), 1);
        assert_eq!(header.table.get(0x41).unwrap().len(), 1);
        // 100 one-bit codes fill 13 bytes with 4 bits to spare.
        assert_eq!(out.len() - used, 13);
        assert_eq!(header.padding, 4);
    }

    #[test]
    fn aaabbc_layout_test() {
        let out = compress(b"aaabbc").unwrap();
        let (header, used) = Header::read(&out).unwrap();
        assert_eq!(used, 8 + 3 * 5 + 1 + 2 + 2);
        assert_eq!(header.padding, 7);
        let payload = &out[used..];
        assert_eq!(payload, &[0b0001_1111, 0]);
        let bits: Vec<bool> =
            BitReader::with_limit(payload, payload.len() * 8 - header.padding as usize)
                .collect();
        assert_eq!(bits.len(), 9);
    }

    #[test]
    fn deterministic_test() {
        let text = b"It was the best of times, it was the worst of times.";
        assert_eq!(compress(text).unwrap(), compress(text).unwrap());
    }

    #[test]
    fn padding_bound_test() {
        for len in 1..64_usize {
            let data: Vec<u8> = (0..len).map(|i| (i * 7 % 13) as u8).collect();
            let out = compress(&data).unwrap();
            let (header, used) = Header::read(&out).unwrap();
            assert!(header.padding <= 7);
            let bits: u64 = header.table.encoded_bits(&freqs(&data));
            assert_eq!((out.len() - used) as u64, (bits + 7) / 8);
        }
    }

    #[test]
    fn compress_file_onto_itself_test() {
        let target = std::env::temp_dir()
            .join(format!("huffpack-{}-self.txt", std::process::id()))
            .to_string_lossy()
            .into_owned();
        std::fs::write(&target, b"do not lose me").unwrap();
        let mut opts = HuffOpts::new();
        opts.file = Some(target.clone());
        opts.out_file = Some(target.clone());
        opts.force_overwrite = true;

        assert!(compress_file(&opts).is_err());
        assert_eq!(std::fs::read(&target).unwrap(), b"do not lose me");
        std::fs::remove_file(&target).unwrap();
    }

    #[test]
    fn shrinks_skewed_text_test() {
        let text = "aaaaaaaaaaaaaaaabbbbbbbbccccdde".repeat(40);
        let out = compress(text.as_bytes()).unwrap();
        assert!(out.len() < text.len());
    }
}
