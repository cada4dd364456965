//! Prefix-code compression.
//!
//! This module provides lossless compression of arbitrary byte streams with
//! two interchangeable variable-length prefix codes:
//! - Huffman coding (bottom-up, optimal)
//! - Shannon-Fano coding (top-down, recursive balanced splitting)
//!
//! Both builders turn a [`FrequencyTable`] into a [`CodeTree`] and its
//! [`Codebook`]; everything downstream (bit packing, tree-walk decoding,
//! round-trip verification) is shared.
//!
//! # Examples
//!
//! ```rust
//! use prefix_codec::compression::{codec, Algorithm};
//!
//! let data = b"AAAAABBBCC";
//! let encoded = codec::encode(data, Algorithm::Huffman)?;
//! let decoded = codec::decode(&encoded.code.tree, &encoded.payload)?;
//! assert_eq!(decoded, data);
//! # Ok::<(), prefix_codec::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

pub use crate::error::Result;
use crate::error::Error;

pub mod bit_packer;
pub mod codebook;
pub mod codec;
pub mod entropy;
pub mod frequency;
pub mod huffman;
pub mod shannon_fano;
pub mod tree;

pub use bit_packer::{pack, unpack, PackedPayload};
pub use codebook::{Code, Codebook};
pub use codec::{Codec, CodecConfig, Encoded};
pub use entropy::{efficiency, entropy, expected_code_length};
pub use frequency::FrequencyTable;
pub use huffman::HuffmanBuilder;
pub use shannon_fano::ShannonFanoBuilder;
pub use tree::{CodeNode, CodeTree};

/// Trait for compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// A prefix code: the tree and the codebook derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixCode {
    pub codebook: Codebook,
    pub tree: CodeTree,
}

/// Trait for prefix-code construction algorithms.
///
/// Implementations differ only in how they shape the tree; the codebook is
/// always read off the tree's root-to-leaf paths.
pub trait PrefixCodeBuilder {
    /// Canonical lowercase name of the algorithm.
    fn name(&self) -> &'static str;

    /// Build the code tree for `table`. An empty table yields an empty tree.
    fn build_tree(&self, table: &FrequencyTable) -> CodeTree;

    /// Build the tree and its codebook.
    fn build(&self, table: &FrequencyTable) -> PrefixCode {
        let tree = self.build_tree(table);
        let codebook = tree.codebook();
        PrefixCode { codebook, tree }
    }
}

/// Selects one of the available [`PrefixCodeBuilder`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[default]
    Huffman,
    ShannonFano,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Huffman, Algorithm::ShannonFano];

    pub fn builder(self) -> &'static dyn PrefixCodeBuilder {
        match self {
            Algorithm::Huffman => &HuffmanBuilder,
            Algorithm::ShannonFano => &ShannonFanoBuilder,
        }
    }

    pub fn name(self) -> &'static str {
        self.builder().name()
    }

    pub fn build(self, table: &FrequencyTable) -> PrefixCode {
        self.builder().build(table)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huffman" => Ok(Algorithm::Huffman),
            "shannon" | "shannon-fano" | "shannon_fano" => Ok(Algorithm::ShannonFano),
            other => Err(Error::Configuration(format!(
                "unknown algorithm '{other}' (expected huffman or shannon)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests;
