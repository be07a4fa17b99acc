//! Turns a finished Huffman tree into the byte -> bit sequence table used by
//! both the packer and the decoder.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use log::debug;
use rustc_hash::FxHashMap;

use super::huffman::{HuffTree, Node, NodeData};

/// One prefix code: false is a left edge / 0 bit, true a right edge / 1 bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    /// Parse a code written one ASCII '0'/'1' per bit. Returns None on any other byte.
    pub fn from_ascii(symbols: &[u8]) -> Option<Self> {
        symbols
            .iter()
            .map(|&s| match s {
                b'0' => Some(false),
                b'1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<bool>>>()
            .map(Self)
    }

    /// The code as one ASCII '0'/'1' per bit.
    pub fn to_ascii(&self) -> Vec<u8> {
        self.0.iter().map(|&b| if b { b'1' } else { b'0' }).collect()
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit)
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, other: &Code) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.0 {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Byte value -> code. Iteration is always in ascending byte order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    /// Walk the tree and record the path to every leaf. A lone leaf has no edge
    /// to walk, so it gets the one-bit code 0.
    pub fn from_tree(tree: &HuffTree) -> Self {
        let mut table = Self::new();
        match tree {
            HuffTree::Single { byte, .. } => {
                table.insert(*byte, Code::from_bits(vec![false]));
            }
            HuffTree::Full(root) => {
                let mut stack: Vec<(&Node, Code)> = vec![(root, Code::new())];
                while let Some((node, path)) = stack.pop() {
                    match &node.node_data {
                        NodeData::Kids(left, right) => {
                            let mut right_path = path.clone();
                            right_path.push(true);
                            stack.push((right, right_path));
                            let mut left_path = path;
                            left_path.push(false);
                            stack.push((left, left_path));
                        }
                        NodeData::Leaf(byte) => {
                            table.insert(*byte, path);
                        }
                    }
                }
            }
        }
        debug!("Generated {} codes.", table.len());
        table
    }

    /// Insert a code, returning the previous code for this byte if there was one.
    pub fn insert(&mut self, byte: u8, code: Code) -> Option<Code> {
        self.codes.insert(byte, code)
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes.get(&byte)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&byte, code)| (byte, code))
    }

    /// True when no code is a prefix of (or equal to) another.
    pub fn is_prefix_free(&self) -> bool {
        // After sorting, any code that prefixes another also prefixes its immediate successor.
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort_unstable();
        sorted.windows(2).all(|w| !w[1].starts_with(w[0]))
    }

    /// Reverse lookup used by the decoder. Returns None if two bytes share a code.
    pub fn reverse(&self) -> Option<FxHashMap<Code, u8>> {
        let mut reverse = FxHashMap::default();
        for (byte, code) in self.iter() {
            if reverse.insert(code.clone(), byte).is_some() {
                return None;
            }
        }
        Some(reverse)
    }

    /// Number of bits needed to encode data with the given per-byte counts.
    pub fn encoded_bits(&self, freqs: &[u64]) -> u64 {
        self.iter()
            .map(|(byte, code)| freqs.get(byte as usize).copied().unwrap_or(0) * code.len() as u64)
            .sum()
    }
}
