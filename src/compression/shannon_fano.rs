//! Shannon-Fano code construction.
//!
//! Top-down: sort symbols by descending count, then recursively cut the
//! sorted run into two contiguous groups whose summed counts are as close as
//! possible. The first group takes bit `0`, the second bit `1`.
//!
//! Symbols with equal counts keep ascending byte order, and when several cut
//! points reach the same minimal difference the earliest one wins.

use log::{debug, trace};

use crate::compression::frequency::FrequencyTable;
use crate::compression::tree::{CodeNode, CodeTree};
use crate::compression::PrefixCodeBuilder;

/// Builds prefix codes by recursive balanced splitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShannonFanoBuilder;

impl PrefixCodeBuilder for ShannonFanoBuilder {
    fn name(&self) -> &'static str {
        "shannon-fano"
    }

    fn build_tree(&self, table: &FrequencyTable) -> CodeTree {
        let mut symbols: Vec<(u8, u64)> = table.iter().collect();
        if symbols.is_empty() {
            return CodeTree::empty();
        }
        // Stable sort keeps ascending byte order among equal counts.
        symbols.sort_by(|a, b| b.1.cmp(&a.1));

        let tree = CodeTree::new(split(&symbols));
        debug!(
            "shannon-fano tree built: {} symbols, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        tree
    }
}

/// Build the subtree for a non-empty, descending-sorted run of symbols.
fn split(symbols: &[(u8, u64)]) -> CodeNode {
    if let [(symbol, weight)] = symbols {
        return CodeNode::leaf(*symbol, *weight);
    }

    let at = best_split(symbols);
    trace!(
        "split {} symbols after index {} ({} | {})",
        symbols.len(),
        at,
        symbols[..at].len(),
        symbols[at..].len()
    );
    let (head, tail) = symbols.split_at(at);
    CodeNode::merge(split(head), split(tail))
}

/// Index at which to cut `symbols` (len >= 2) so that both sides are
/// non-empty and the difference of their sums is minimal.
fn best_split(symbols: &[(u8, u64)]) -> usize {
    let total: u64 = symbols.iter().map(|&(_, w)| w).sum();
    let mut running = 0u64;
    let mut best_at = 1;
    let mut best_diff = u64::MAX;

    // Every one of the n - 1 cut points is evaluated.
    for (i, &(_, weight)) in symbols[..symbols.len() - 1].iter().enumerate() {
        running += weight;
        let diff = running.abs_diff(total - running);
        if diff < best_diff {
            best_diff = diff;
            best_at = i + 1;
        }
    }
    best_at
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::HuffmanBuilder;

    #[test]
    fn test_textbook_example() {
        // A:15 B:7 C:6 D:6 E:5 splits as {A,B} | {C,D,E}, then {C} | {D,E}.
        let table = FrequencyTable::from_counts([
            (b'A', 15),
            (b'B', 7),
            (b'C', 6),
            (b'D', 6),
            (b'E', 5),
        ]);
        let code = ShannonFanoBuilder.build(&table);
        let codes: Vec<(u8, String)> = [b'A', b'B', b'C', b'D', b'E']
            .iter()
            .map(|&s| (s, code.codebook.code_string(s).unwrap()))
            .collect();
        assert_eq!(
            codes,
            vec![
                (b'A', "00".to_string()),
                (b'B', "01".to_string()),
                (b'C', "10".to_string()),
                (b'D', "110".to_string()),
                (b'E', "111".to_string()),
            ]
        );
    }

    #[test]
    fn test_best_split_picks_first_minimum() {
        // Cuts give differences 2, 0, 2 -> index 2.
        assert_eq!(best_split(&[(0, 1), (1, 1), (2, 1), (3, 1)]), 2);
        // 5 | 3 2 gives 0.
        assert_eq!(best_split(&[(b'A', 5), (b'B', 3), (b'C', 2)]), 1);
        // Cuts give 1, 1: the earlier one wins.
        assert_eq!(best_split(&[(0, 1), (1, 1), (2, 1)]), 1);
    }

    #[test]
    fn test_prefix_free_and_complete() {
        let data = b"the quick brown fox jumps over the lazy dog, again and again";
        let table = FrequencyTable::count(data);
        let code = ShannonFanoBuilder.build(&table);
        assert!(code.codebook.is_prefix_free());
        assert_eq!(code.codebook.len(), table.distinct());
        assert_eq!(code.tree.leaf_count(), table.distinct());
    }

    #[test]
    fn test_degenerate_tables() {
        assert!(ShannonFanoBuilder
            .build(&FrequencyTable::count(&[]))
            .codebook
            .is_empty());

        let code = ShannonFanoBuilder.build(&FrequencyTable::count(&[7; 12]));
        assert_eq!(code.codebook.code_string(7).as_deref(), Some("0"));
    }

    #[test]
    fn test_not_better_than_huffman() {
        let table = FrequencyTable::from_counts([
            (b'a', 35),
            (b'b', 17),
            (b'c', 17),
            (b'd', 16),
            (b'e', 15),
        ]);
        let sf = ShannonFanoBuilder.build(&table).codebook.encoded_bits(&table);
        let huff = HuffmanBuilder.build(&table).codebook.encoded_bits(&table);
        assert!(huff <= sf, "huffman {huff} bits vs shannon-fano {sf} bits");
        // The classic counterexample where Shannon-Fano is strictly worse.
        assert!(huff < sf);
    }
}
