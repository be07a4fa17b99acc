//! The huffman module builds the prefix code used by huffpack.
//!
//! A min-priority queue of leaves, one per byte value present in the input, is
//! merged two at a time into a full binary tree. Walking that tree gives every
//! byte its code: 0 for each left edge, 1 for each right edge. Frequent bytes end
//! up near the root and get short codes.
//!
//! Input holding a single byte value has no edges to walk; that byte gets the
//! one-bit code 0.
//!

pub mod code_table;
pub mod huffman;
