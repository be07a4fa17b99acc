//! The compression module holds the two public pipelines and the header they share.
//!
//! Compression happens in the following steps:
//! - Frequency count: how often each byte value appears.
//! - Tree building: merge the two lightest nodes until one root remains.
//! - Code table: walk the tree to find each byte's code.
//! - Bit packing: write every byte's code in order, then pad to a byte boundary.
//! - Header: padding count and code table, written in front of the payload.
//!
//! Decompression reads the header, then gathers payload bits until they match a
//! code, emitting that code's byte each time. Everything happens in memory and
//! in a single pass.
//!

pub mod compress;
pub mod decompress;
pub mod header;
