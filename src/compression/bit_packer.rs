//! Packing of bit-strings into byte buffers.
//!
//! Bits fill each byte from the most significant end. A bit-string whose
//! length is not a multiple of 8 is padded with trailing zero bits, and the
//! number of filler bits (0-7) travels with the bytes so that unpacking can
//! strip them again.

use bitvec::prelude::*;
use log::debug;

use crate::compression::codebook::Code;
use crate::error::{Error, Result};

/// Largest legal padding count.
pub const MAX_PADDING: u8 = 7;

/// Byte-aligned bit-string plus the count of trailing filler bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedPayload {
    bytes: Vec<u8>,
    padding: u8,
}

impl PackedPayload {
    /// Wrap bytes produced elsewhere (e.g. loaded from storage).
    ///
    /// Fails when `padding` exceeds 7, or when filler is claimed for an
    /// empty buffer.
    pub fn new(bytes: Vec<u8>, padding: u8) -> Result<Self> {
        if padding > MAX_PADDING {
            return Err(Error::Configuration(format!(
                "padding count {padding} is outside 0-{MAX_PADDING}"
            )));
        }
        if bytes.is_empty() && padding != 0 {
            return Err(Error::Configuration(format!(
                "padding count {padding} given for an empty payload"
            )));
        }
        Ok(PackedPayload { bytes, padding })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn padding(&self) -> u8 {
        self.padding
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 - self.padding as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_parts(self) -> (Vec<u8>, u8) {
        (self.bytes, self.padding)
    }
}

/// Group `bits` into bytes, zero-padding the final byte.
pub fn pack(bits: &BitSlice<u8, Msb0>) -> PackedPayload {
    let padding = (8 - bits.len() % 8) % 8;
    let mut packed = BitVec::<u8, Msb0>::with_capacity(bits.len() + padding);
    packed.extend_from_bitslice(bits);
    packed.resize(bits.len() + padding, false);
    debug!(
        "packed {} bits into {} bytes with {} padding bits",
        bits.len(),
        packed.len() / 8,
        padding
    );
    PackedPayload {
        bytes: packed.into_vec(),
        padding: padding as u8,
    }
}

/// Expand a payload back into its bit-string, dropping the filler bits.
pub fn unpack(payload: &PackedPayload) -> Code {
    let mut bits = Code::from_slice(&payload.bytes);
    bits.truncate(payload.bit_len());
    bits
}
