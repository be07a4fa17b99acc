use log::{debug, trace};

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    /// Insertion sequence number, used to break weight ties.
    pub seq: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, seq: u32, node_data: NodeData) -> Node {
        Node {
            weight,
            seq,
            node_data,
        }
    }

    /// Number of leaves (distinct byte values) below this node.
    pub fn leaf_count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => left.leaf_count() + right.leaf_count(),
            NodeData::Leaf(_) => 1,
        }
    }

    /// Number of internal nodes below and including this node.
    pub fn internal_count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.internal_count() + right.internal_count(),
            NodeData::Leaf(_) => 0,
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.depth().max(right.depth()),
            NodeData::Leaf(_) => 0,
        }
    }
}

impl Ord for Node {
    /// Reverse ordering so a BinaryHeap pops the lightest node first, and among
    /// equal weights the one inserted earliest.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A finished prefix tree. A single distinct byte value has no edges to walk,
/// so it is reported separately rather than as a childless root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffTree {
    Single { byte: u8, weight: u64 },
    Full(Node),
}

impl HuffTree {
    /// Total weight of the tree, which is the length of the input it was built from.
    pub fn weight(&self) -> u64 {
        match self {
            HuffTree::Single { weight, .. } => *weight,
            HuffTree::Full(root) => root.weight,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            HuffTree::Single { .. } => 1,
            HuffTree::Full(root) => root.leaf_count(),
        }
    }
}

/// Build a Huffman tree from (byte, count) pairs. Returns None when there are no symbols.
///
/// The two lightest nodes are merged until one remains; the first one taken off
/// the queue becomes the left child. Leaves are numbered in the order given and
/// each new parent takes the next number, so identical input always yields an
/// identical tree.
pub fn build_tree(symbols: &[(u8, u64)]) -> Option<HuffTree> {
    match symbols {
        [] => return None,
        [(byte, weight)] => {
            debug!("Single symbol {:#04x}, weight {}.", byte, weight);
            return Some(HuffTree::Single {
                byte: *byte,
                weight: *weight,
            });
        }
        _ => {}
    }

    let mut seq = 0_u32;
    let mut queue: BinaryHeap<Node> = symbols
        .iter()
        .map(|&(byte, weight)| {
            seq += 1;
            Node::new(weight, seq, NodeData::Leaf(byte))
        })
        .collect();

    while queue.len() > 1 {
        let (Some(left_child), Some(right_child)) = (queue.pop(), queue.pop()) else {
            break;
        };
        seq += 1;
        trace!(
            "Merging weights {} and {} into node {}.",
            left_child.weight,
            right_child.weight,
            seq
        );
        queue.push(Node::new(
            left_child.weight + right_child.weight,
            seq,
            NodeData::Kids(Box::new(left_child), Box::new(right_child)),
        ));
    }

    let root = queue.pop()?;
    debug!(
        "Built tree over {} symbols, weight {}, depth {}.",
        symbols.len(),
        root.weight,
        root.depth()
    );
    Some(HuffTree::Full(root))
}

#[cfg(test)]
mod test {
    use super::*;

    /// Every internal node has two kids and carries the sum of its leaves.
    fn check_weights(node: &Node) -> u64 {
        match &node.node_data {
            NodeData::Kids(left, right) => {
                let sum = check_weights(left) + check_weights(right);
                assert_eq!(node.weight, sum);
                sum
            }
            NodeData::Leaf(_) => node.weight,
        }
    }

    fn collect_leaves(node: &Node, out: &mut Vec<u8>) {
        match &node.node_data {
            NodeData::Kids(left, right) => {
                collect_leaves(left, out);
                collect_leaves(right, out);
            }
            NodeData::Leaf(byte) => out.push(*byte),
        }
    }

    #[test]
    fn empty_test() {
        assert_eq!(build_tree(&[]), None);
    }

    #[test]
    fn single_symbol_test() {
        let tree = build_tree(&[(b'A', 100)]).unwrap();
        assert_eq!(
            tree,
            HuffTree::Single {
                byte: b'A',
                weight: 100
            }
        );
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn abc_shape_test() {
        let tree = build_tree(&[(b'a', 3), (b'b', 2), (b'c', 1)]).unwrap();
        let HuffTree::Full(root) = tree else {
            panic!("expected a full tree")
        };
        assert_eq!(root.weight, 6);
        assert_eq!(root.leaf_count(), 3);
        assert_eq!(root.internal_count(), 2);
        assert_eq!(root.depth(), 2);
        check_weights(&root);
    }

    #[test]
    fn first_popped_goes_left_test() {
        let tree = build_tree(&[(b'x', 5), (b'y', 1)]).unwrap();
        let HuffTree::Full(root) = tree else {
            panic!("expected a full tree")
        };
        match root.node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(left.node_data, NodeData::Leaf(b'y'));
                assert_eq!(right.node_data, NodeData::Leaf(b'x'));
            }
            NodeData::Leaf(_) => panic!("root should have kids"),
        }
    }

    #[test]
    fn ties_break_by_insertion_order_test() {
        let tree = build_tree(&[(b'p', 1), (b'q', 1)]).unwrap();
        let HuffTree::Full(root) = tree else {
            panic!("expected a full tree")
        };
        let mut leaves = vec![];
        collect_leaves(&root, &mut leaves);
        assert_eq!(leaves, vec![b'p', b'q']);
    }

    #[test]
    fn deterministic_test() {
        let syms: Vec<(u8, u64)> = (0..=255_u8).map(|b| (b, (b as u64 % 7) + 1)).collect();
        assert_eq!(build_tree(&syms), build_tree(&syms));
    }

    #[test]
    fn leaves_match_symbols_test() {
        let syms: Vec<(u8, u64)> = b"the quick brown fox"
            .iter()
            .fold(vec![0_u64; 256], |mut f, &b| {
                f[b as usize] += 1;
                f
            })
            .into_iter()
            .enumerate()
            .filter(|(_, c)| *c > 0)
            .map(|(b, c)| (b as u8, c))
            .collect();
        let HuffTree::Full(root) = build_tree(&syms).unwrap() else {
            panic!("expected a full tree")
        };
        let mut leaves = vec![];
        collect_leaves(&root, &mut leaves);
        leaves.sort_unstable();
        let expected: Vec<u8> = syms.iter().map(|&(b, _)| b).collect();
        assert_eq!(leaves, expected);
        assert_eq!(root.internal_count(), syms.len() - 1);
        assert_eq!(check_weights(&root), 19);
    }
}
