//! Shannon entropy and code-length statistics.
//!
//! These figures are informational only; nothing in encoding or decoding
//! depends on them.

use crate::compression::codebook::Codebook;
use crate::compression::frequency::FrequencyTable;

/// Shannon entropy of `table` in bits per byte.
///
/// H = -sum p(x) * log2 p(x) over present symbols. An empty table has
/// entropy 0.
pub fn entropy(table: &FrequencyTable) -> f64 {
    let total = table.total();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    table
        .iter()
        .map(|(_, count)| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Expected code length in bits per byte: sum p(x) * len(code(x)).
pub fn expected_code_length(table: &FrequencyTable, codebook: &Codebook) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    codebook.encoded_bits(table) as f64 / table.total() as f64
}

/// Ratio of entropy to expected code length, in `[0, 1]` for a valid code.
///
/// Defined as 1.0 when both are zero (empty input, or one distinct byte
/// where nothing is left to save).
pub fn efficiency(table: &FrequencyTable, codebook: &Codebook) -> f64 {
    let length = expected_code_length(table, codebook);
    if length == 0.0 {
        return 1.0;
    }
    entropy(table) / length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::{HuffmanBuilder, PrefixCodeBuilder};
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_table_has_zero_entropy() {
        assert_eq!(entropy(&FrequencyTable::count(&[])), 0.0);
    }

    #[test]
    fn test_single_symbol_has_zero_entropy() {
        assert_eq!(entropy(&FrequencyTable::count(&[9; 40])), 0.0);
    }

    #[test]
    fn test_uniform_distribution() {
        let data: Vec<u8> = (0..=255u8).cycle().take(256 * 4).collect();
        assert_relative_eq!(entropy(&FrequencyTable::count(&data)), 8.0, epsilon = 1e-10);

        assert_relative_eq!(entropy(&FrequencyTable::count(b"abab")), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_skewed_distribution() {
        let table = FrequencyTable::count(b"AAAAABBBCC");
        let expected = -(0.5 * 0.5f64.log2() + 0.3 * 0.3f64.log2() + 0.2 * 0.2f64.log2());
        assert_relative_eq!(entropy(&table), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_code_length_bounds() {
        let table = FrequencyTable::count(b"AAAAABBBCC");
        let codebook = HuffmanBuilder.build(&table).codebook;
        // A:1 bit, B:2, C:2 -> (5 + 6 + 4) / 10
        assert_relative_eq!(expected_code_length(&table, &codebook), 1.5, epsilon = 1e-12);
        let eff = efficiency(&table, &codebook);
        assert!(eff > 0.9 && eff <= 1.0);
        assert_eq!(efficiency(&FrequencyTable::count(&[]), &Codebook::new()), 1.0);
    }
}
