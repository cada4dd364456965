//! Encode/decode orchestration.
//!
//! Encoding runs frequency analysis, the selected builder, maps every byte
//! through the codebook and packs the concatenated codes. Decoding unpacks
//! the bits and walks the tree from the root, emitting a byte at every leaf.

use std::time::Instant;

use bitvec::prelude::*;
use log::debug;

use crate::compression::bit_packer::{self, PackedPayload};
use crate::compression::codebook::{Code, Codebook};
use crate::compression::entropy::{efficiency, entropy, expected_code_length};
use crate::compression::frequency::FrequencyTable;
use crate::compression::tree::{CodeNode, CodeTree};
use crate::compression::{Algorithm, Compression, PrefixCode};
use crate::error::{Error, Result};
use crate::report::CompressionReport;
use crate::storage::{read_archive, Archive, MemoryStorage, Storage};

/// Output of [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub table: FrequencyTable,
    pub code: PrefixCode,
    pub payload: PackedPayload,
}

/// Encode `data` with the prefix code built by `algorithm`.
pub fn encode(data: &[u8], algorithm: Algorithm) -> Result<Encoded> {
    let table = FrequencyTable::count(data);
    debug!(
        "{} bytes analysed: {} distinct values",
        data.len(),
        table.distinct()
    );
    let code = algorithm.build(&table);
    let bits = encode_bits(data, &code.codebook)?;
    let payload = bit_packer::pack(&bits);
    Ok(Encoded {
        table,
        code,
        payload,
    })
}

/// Concatenate the codes of every byte of `data`.
pub fn encode_bits(data: &[u8], codebook: &Codebook) -> Result<Code> {
    let mut bits = Code::with_capacity(data.len());
    for (offset, &byte) in data.iter().enumerate() {
        let code = codebook.get(byte).ok_or(Error::Encoding { byte, offset })?;
        bits.extend_from_bitslice(code);
    }
    Ok(bits)
}

/// Decode a packed payload by walking `tree`.
pub fn decode(tree: &CodeTree, payload: &PackedPayload) -> Result<Vec<u8>> {
    decode_bits(tree, &bit_packer::unpack(payload))
}

/// Decode a payload using only a codebook, rebuilding the tree first.
pub fn decode_with_codebook(codebook: &Codebook, payload: &PackedPayload) -> Result<Vec<u8>> {
    let tree = CodeTree::from_codebook(codebook)?;
    decode(&tree, payload)
}

/// Walk `tree` one bit at a time (`0` left, `1` right), emitting the byte of
/// each leaf reached and restarting at the root.
///
/// A single-leaf tree consumes one `0` bit per byte.
pub fn decode_bits(tree: &CodeTree, bits: &BitSlice<u8, Msb0>) -> Result<Vec<u8>> {
    let Some(root) = tree.root() else {
        if bits.is_empty() {
            return Ok(Vec::new());
        }
        return Err(Error::decoding(0, "bits present but the code tree is empty"));
    };

    let mut output = Vec::new();

    if let CodeNode::Leaf { symbol, .. } = root {
        for (i, bit) in bits.iter().by_vals().enumerate() {
            if bit {
                return Err(Error::decoding(i, "single-symbol code has no `1` branch"));
            }
            output.push(*symbol);
        }
        return Ok(output);
    }

    let mut current = root;
    let mut depth = 0usize;
    for bit in bits.iter().by_vals() {
        if let CodeNode::Internal { left, right, .. } = current {
            current = if bit { right } else { left };
            depth += 1;
        }
        if let CodeNode::Leaf { symbol, .. } = current {
            output.push(*symbol);
            current = root;
            depth = 0;
        }
    }

    if depth != 0 {
        return Err(Error::decoding(
            bits.len(),
            "bit-string ended in the middle of a code",
        ));
    }
    Ok(output)
}

/// Check that `decoded` reproduces `original` exactly.
pub fn verify(original: &[u8], decoded: &[u8]) -> Result<()> {
    if original == decoded {
        debug!("round trip verified: {} bytes", original.len());
        return Ok(());
    }
    let first_mismatch = original
        .iter()
        .zip(decoded)
        .position(|(a, b)| a != b)
        .or(Some(original.len().min(decoded.len())));
    Err(Error::Verification {
        original_len: original.len(),
        decoded_len: decoded.len(),
        first_mismatch,
    })
}

/// Configuration for [`Codec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Prefix-code algorithm used when compressing.
    pub algorithm: Algorithm,
    /// Decode the persisted archive after compressing and compare.
    pub verify: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            algorithm: Algorithm::Huffman,
            verify: true,
        }
    }
}

impl CodecConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

/// Compression pipeline tying the codec to a storage collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Codec { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `data`, persist it to `storage`, and (when configured) load it
    /// back and verify the round trip.
    ///
    /// Nothing is persisted unless encoding succeeds. The report's
    /// compressed size is the number of bytes `storage` wrote and its
    /// elapsed time covers encoding only.
    pub fn compress_to<S: Storage + ?Sized>(
        &self,
        data: &[u8],
        storage: &mut S,
    ) -> Result<CompressionReport> {
        let start = Instant::now();
        let Encoded {
            table,
            code,
            payload,
        } = encode(data, self.config.algorithm)?;
        let elapsed = start.elapsed();

        let report = CompressionReport {
            algorithm: self.config.algorithm,
            original_size: data.len() as u64,
            compressed_size: 0,
            elapsed,
            entropy: entropy(&table),
            average_code_length: expected_code_length(&table, &code.codebook),
            efficiency: efficiency(&table, &code.codebook),
        };

        let compressed_size = storage.persist(&Archive::new(code.codebook, payload))?;

        if self.config.verify {
            let decoded = self.decompress_from(storage)?;
            verify(data, &decoded)?;
        }

        Ok(CompressionReport {
            compressed_size,
            ..report
        })
    }

    /// Load an archive from `storage` and decode it.
    pub fn decompress_from<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<Vec<u8>> {
        let archive = storage.load()?;
        decode_with_codebook(archive.codebook(), archive.payload())
    }
}

impl Compression for Codec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut storage = MemoryStorage::new();
        self.compress_to(data, &mut storage)?;
        Ok(storage.into_bytes())
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut reader = data;
        let archive = read_archive(&mut reader)?;
        decode_with_codebook(archive.codebook(), archive.payload())
    }
}
