//! The bitstream module forms the bit-level I/O for huffpack.
//!
//! The packer turns a run of prefix codes into bytes, most significant bit first,
//! and records how many zero bits were needed to finish the last byte. The reader
//! walks those bytes back out one bit at a time and stops before the padding.
//!
//! Both work on buffers held entirely in memory. They are not intended for more
//! general use.
//!
pub mod bitpacker;
pub mod bitreader;
