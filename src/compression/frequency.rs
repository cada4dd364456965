//! Byte frequency analysis.

/// Number of distinct byte values.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence counts for each of the 256 byte values of an input.
///
/// Built once per input and never mutated afterwards. The sum of all counts
/// equals the input length, and iteration only ever yields byte values that
/// actually occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn count(data: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        for &b in data {
            counts[b as usize] += 1;
        }
        FrequencyTable {
            counts,
            total: data.len() as u64,
        }
    }

    /// Build a table directly from `(symbol, count)` pairs.
    ///
    /// Repeated symbols accumulate; zero counts are ignored.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; ALPHABET_SIZE];
        let mut total = 0u64;
        for (symbol, count) in pairs {
            counts[symbol as usize] += count;
            total += count;
        }
        FrequencyTable { counts, total }
    }

    /// Count of `symbol` (zero when absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total number of counted bytes.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Present symbols with their counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(symbol, &c)| (symbol as u8, c))
    }

    /// Probability of `symbol`, or 0.0 for an empty table.
    pub fn probability(&self, symbol: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.get(symbol) as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_table() {
        let table = FrequencyTable::count(b"aabccc");
        assert_eq!(table.get(b'a'), 2);
        assert_eq!(table.get(b'b'), 1);
        assert_eq!(table.get(b'c'), 3);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 3);
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::count(&[]);
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.iter().count(), 0);
        assert_eq!(table.probability(0), 0.0);
    }

    #[test]
    fn test_iter_skips_absent_symbols_in_order() {
        let table = FrequencyTable::count(&[200, 3, 200, 77, 3, 3]);
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(3, 3), (77, 1), (200, 2)]);
    }

    #[test]
    fn test_counts_sum_to_length() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let table = FrequencyTable::count(&data);
        let sum: u64 = table.iter().map(|(_, c)| c).sum();
        assert_eq!(sum, data.len() as u64);
        assert_eq!(table.distinct(), 256);
    }

    #[test]
    fn test_from_counts_ignores_zero() {
        let table = FrequencyTable::from_counts([(b'x', 4), (b'y', 0), (b'x', 1)]);
        assert_eq!(table.get(b'x'), 5);
        assert_eq!(table.distinct(), 1);
        assert_eq!(table.total(), 5);
    }
}
