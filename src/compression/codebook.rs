//! Symbol to bit-string mapping.

use std::collections::BTreeMap;

use bitvec::prelude::*;

use crate::compression::frequency::FrequencyTable;

/// A single code word, most significant (first emitted) bit first.
pub type Code = BitVec<u8, Msb0>;

/// Maps each present byte value to its code word.
///
/// Every code is non-empty and, for codebooks produced by the builders, no
/// code is a prefix of another. Entries iterate in ascending byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codebook {
    codes: BTreeMap<u8, Code>,
}

impl Codebook {
    pub fn new() -> Self {
        Codebook {
            codes: BTreeMap::new(),
        }
    }

    /// Insert or replace the code for `symbol`, returning the previous one.
    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|c| c.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Longest code length in bits (0 for an empty codebook).
    pub fn max_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Whether no code is a prefix of (or equal to) another.
    ///
    /// After a lexicographic sort any prefix relation shows up between
    /// neighbours, so only adjacent pairs are compared.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&BitSlice<u8, Msb0>> =
            self.codes.values().map(|c| c.as_bitslice()).collect();
        codes.sort();
        codes.windows(2).all(|pair| {
            let (shorter, longer) = (pair[0], pair[1]);
            longer.len() < shorter.len() || longer[..shorter.len()] != *shorter
        })
    }

    /// Exact size in bits of encoding an input whose counts are `table`.
    ///
    /// Symbols missing from the codebook contribute nothing.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|c| count * c.len() as u64))
            .sum()
    }

    /// Render the code for `symbol` as a string of `0`/`1`.
    pub fn code_string(&self, symbol: u8) -> Option<String> {
        self.get(symbol).map(render_code)
    }
}

impl FromIterator<(u8, Code)> for Codebook {
    fn from_iter<I: IntoIterator<Item = (u8, Code)>>(iter: I) -> Self {
        Codebook {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Render a code word as `0`/`1` characters.
pub fn render_code(code: &BitSlice<u8, Msb0>) -> String {
    code.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Parse a string of `0`/`1` characters into a code word.
///
/// Returns `None` if any other character appears.
pub fn parse_code(text: &str) -> Option<Code> {
    text.chars()
        .map(|ch| match ch {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(entries: &[(u8, &str)]) -> Codebook {
        entries
            .iter()
            .map(|&(symbol, text)| (symbol, parse_code(text).unwrap()))
            .collect()
    }

    #[test]
    fn test_parse_and_render() {
        let code = parse_code("10110").unwrap();
        assert_eq!(code.len(), 5);
        assert_eq!(render_code(&code), "10110");
        assert!(parse_code("10a").is_none());
        assert_eq!(parse_code("").unwrap().len(), 0);
    }

    #[test]
    fn test_prefix_free_detection() {
        assert!(book(&[(b'a', "0"), (b'b', "10"), (b'c', "11")]).is_prefix_free());
        assert!(!book(&[(b'a', "1"), (b'b', "10"), (b'c', "0")]).is_prefix_free());
        assert!(!book(&[(b'a', "01"), (b'b', "01")]).is_prefix_free());
        // Prefix relation hidden behind a lexicographically smaller neighbour.
        assert!(!book(&[(b'a', "0"), (b'b', "00"), (b'c', "01")]).is_prefix_free());
        assert!(Codebook::new().is_prefix_free());
    }

    #[test]
    fn test_encoded_bits() {
        let table = FrequencyTable::count(b"AAAAABBBCC");
        let codebook = book(&[(b'A', "0"), (b'B', "11"), (b'C', "10")]);
        assert_eq!(codebook.encoded_bits(&table), 5 + 6 + 4);
        assert_eq!(codebook.max_len(), 2);
        assert_eq!(codebook.code_string(b'B').as_deref(), Some("11"));
        assert_eq!(codebook.code_string(b'Z'), None);
    }
}
