//! Lossless compression of a byte buffer with a Huffman prefix code.
//!
//! The output is self-describing: a header carrying the padding count and the
//! code table, followed by the packed payload. `decompress(compress(b))` always
//! returns `b`, including for empty input.
//!
//! ```
//! let packed = huffpack::compress(b"aaabbc").unwrap();
//! assert_eq!(huffpack::decompress(&packed).unwrap(), b"aaabbc");
//! ```
//!
//! The `huffpack` binary wraps the same two calls for files:
//!
//! `$> huffpack notes.txt`
//!
//! This will compress the file and create notes.txt.huf.
//! The original file will be deleted unless `-k` is given.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::compress;
pub use compression::decompress::decompress;
pub use error::{HuffError, Result};
