//! Compression performance summary.

use std::fmt;
use std::time::Duration;

use crate::compression::Algorithm;

/// Read-only summary of one compression run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionReport {
    pub algorithm: Algorithm,
    /// Input size in bytes.
    pub original_size: u64,
    /// Persisted archive size in bytes.
    pub compressed_size: u64,
    /// Time spent encoding.
    pub elapsed: Duration,
    /// Shannon entropy of the input, bits per byte.
    pub entropy: f64,
    /// Expected code length, bits per byte.
    pub average_code_length: f64,
    /// Entropy divided by average code length.
    pub efficiency: f64,
}

impl CompressionReport {
    /// Original size over compressed size; 0 when nothing was written.
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }

    /// Percentage of the original size saved; 0 for an empty input.
    pub fn space_saving(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_size as f64 / self.original_size as f64) * 100.0
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(43);
        writeln!(f, "{rule}")?;
        writeln!(f, " PERFORMANCE REPORT: {}", self.algorithm)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:<25} | {:<15}", "Metric", "Value")?;
        writeln!(f, "{}", "-".repeat(43))?;
        writeln!(f, "{:<25} | {} bytes", "Original Size", self.original_size)?;
        writeln!(f, "{:<25} | {} bytes", "Compressed Size", self.compressed_size)?;
        writeln!(f, "{:<25} | {:.2}", "Compression Ratio", self.ratio())?;
        writeln!(f, "{:<25} | {:.2} %", "Space Saving", self.space_saving())?;
        writeln!(
            f,
            "{:<25} | {:.2} ms",
            "Execution Time",
            self.elapsed.as_secs_f64() * 1000.0
        )?;
        writeln!(f, "{:<25} | {:.4} bits/byte", "Entropy", self.entropy)?;
        writeln!(
            f,
            "{:<25} | {:.4} bits/byte",
            "Average Code Length", self.average_code_length
        )?;
        writeln!(f, "{:<25} | {:.2} %", "Coding Efficiency", self.efficiency * 100.0)?;
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn report(original_size: u64, compressed_size: u64) -> CompressionReport {
        CompressionReport {
            algorithm: Algorithm::Huffman,
            original_size,
            compressed_size,
            elapsed: Duration::from_millis(3),
            entropy: 1.4855,
            average_code_length: 1.5,
            efficiency: 0.99,
        }
    }

    #[test]
    fn test_ratio_and_saving() {
        let r = report(1000, 400);
        assert_relative_eq!(r.ratio(), 2.5);
        assert_relative_eq!(r.space_saving(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_expansion_gives_negative_saving() {
        let r = report(10, 40);
        assert_relative_eq!(r.space_saving(), -300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_sizes() {
        assert_eq!(report(0, 16).space_saving(), 0.0);
        assert_eq!(report(10, 0).ratio(), 0.0);
    }

    #[test]
    fn test_display() {
        let text = report(1000, 400).to_string();
        assert!(text.contains("PERFORMANCE REPORT: huffman"));
        assert!(text.contains("Compression Ratio         | 2.50"));
        assert!(text.contains("Space Saving              | 60.00 %"));
        assert!(text.contains("Execution Time            | 3.00 ms"));
    }
}
