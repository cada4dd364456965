//! Huffman code construction.
//!
//! Bottom-up: start with one leaf per symbol and keep merging the two
//! lightest nodes until a single root remains.
//!
//! Ties are broken by creation order. Leaves are numbered in ascending byte
//! order, every merged node takes the next number, and among equal weights
//! the lower number pops first (FIFO). The first node popped in a merge
//! becomes the left (`0`) child. Identical tables therefore always give
//! identical trees.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::compression::frequency::FrequencyTable;
use crate::compression::tree::{CodeNode, CodeTree};
use crate::compression::PrefixCodeBuilder;

/// Builds optimal prefix codes with Huffman's algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuffmanBuilder;

/// Heap entry wrapping a subtree.
/// We want the lightest, then oldest, entry to have highest priority.
#[derive(Debug)]
struct Pending {
    weight: u64,
    sequence: usize,
    node: CodeNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower weight / earlier sequence should come first.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PrefixCodeBuilder for HuffmanBuilder {
    fn name(&self) -> &'static str {
        "huffman"
    }

    fn build_tree(&self, table: &FrequencyTable) -> CodeTree {
        let mut heap: BinaryHeap<Pending> = table
            .iter()
            .enumerate()
            .map(|(sequence, (symbol, weight))| Pending {
                weight,
                sequence,
                node: CodeNode::leaf(symbol, weight),
            })
            .collect();
        let mut next_sequence = heap.len();

        // Combine nodes until only one tree remains.
        loop {
            let Some(first) = heap.pop() else {
                return CodeTree::empty();
            };
            let Some(second) = heap.pop() else {
                let tree = CodeTree::new(first.node);
                debug!(
                    "huffman tree built: {} symbols, depth {}",
                    tree.leaf_count(),
                    tree.depth()
                );
                return tree;
            };
            let merged = CodeNode::merge(first.node, second.node);
            heap.push(Pending {
                weight: merged.weight(),
                sequence: next_sequence,
                node: merged,
            });
            next_sequence += 1;
        }
    }
}
