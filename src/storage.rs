//! Persistence of the (padding, codebook, payload) triple.
//!
//! Container layout, all integers little-endian:
//!
//! | field          | size                     |
//! |----------------|--------------------------|
//! | magic `PFXC`   | 4                        |
//! | version        | 1                        |
//! | padding count  | 1 (0-7)                  |
//! | entry count    | 2 (0-256)                |
//! | per entry      | symbol 1, code length 1, `ceil(len / 8)` code bytes (MSB first) |
//! | payload length | 8                        |
//! | payload        | payload length           |
//!
//! Nothing may follow the payload.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::compression::bit_packer::PackedPayload;
use crate::compression::codebook::{Code, Codebook};
use crate::compression::frequency::ALPHABET_SIZE;
use crate::error::{Error, Result};

pub const MAGIC: [u8; 4] = *b"PFXC";
pub const VERSION: u8 = 1;

/// Everything needed to reconstruct the original bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    codebook: Codebook,
    payload: PackedPayload,
}

impl Archive {
    pub fn new(codebook: Codebook, payload: PackedPayload) -> Self {
        Archive { codebook, payload }
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn payload(&self) -> &PackedPayload {
        &self.payload
    }

    pub fn padding(&self) -> u8 {
        self.payload.padding()
    }

    pub fn into_parts(self) -> (Codebook, PackedPayload) {
        (self.codebook, self.payload)
    }
}

/// Storage collaborator used by [`crate::compression::Codec`].
pub trait Storage {
    /// Persist `archive`, returning the number of bytes written.
    fn persist(&mut self, archive: &Archive) -> Result<u64>;

    /// Load the most recently persisted archive.
    fn load(&mut self) -> Result<Archive>;
}

/// Serialize `archive` into `writer`, returning the number of bytes written.
pub fn write_archive<W: Write>(writer: &mut W, archive: &Archive) -> Result<u64> {
    let bytes = encode_archive(archive)?;
    writer.write_all(&bytes)?;
    Ok(bytes.len() as u64)
}

fn encode_archive(archive: &Archive) -> Result<Vec<u8>> {
    let payload = archive.payload.bytes();
    let mut out = Vec::with_capacity(16 + archive.codebook.len() * 3 + payload.len());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.push(archive.payload.padding());
    out.extend_from_slice(&(archive.codebook.len() as u16).to_le_bytes());

    for (symbol, code) in archive.codebook.iter() {
        let len = u8::try_from(code.len())
            .ok()
            .filter(|&len| len > 0)
            .ok_or_else(|| {
                Error::Container(format!(
                    "code for byte {symbol:#04x} has unsupported length {}",
                    code.len()
                ))
            })?;
        out.push(symbol);
        out.push(len);
        let padded_len = code.len().div_ceil(8) * 8;
        let mut packed = Code::with_capacity(padded_len);
        packed.extend_from_bitslice(code.as_bitslice());
        packed.resize(padded_len, false);
        out.extend_from_slice(packed.as_raw_slice());
    }

    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Parse an archive from `reader`, which must end right after the payload.
pub fn read_archive<R: Read>(reader: &mut R) -> Result<Archive> {
    let magic: [u8; 4] = read_array(reader, "magic")?;
    if magic != MAGIC {
        return Err(Error::Container(format!("bad magic {magic:02x?}")));
    }
    let [version, padding] = read_array(reader, "header")?;
    if version != VERSION {
        return Err(Error::Container(format!("unsupported version {version}")));
    }

    let count = u16::from_le_bytes(read_array(reader, "entry count")?) as usize;
    if count > ALPHABET_SIZE {
        return Err(Error::Container(format!(
            "entry count {count} exceeds {ALPHABET_SIZE}"
        )));
    }

    let mut codebook = Codebook::new();
    for _ in 0..count {
        let [symbol, len] = read_array(reader, "codebook entry")?;
        if len == 0 {
            return Err(Error::Container(format!(
                "byte {symbol:#04x} has an empty code"
            )));
        }
        let mut raw = vec![0u8; (len as usize).div_ceil(8)];
        reader
            .read_exact(&mut raw)
            .map_err(|e| truncated(e, "code bits"))?;
        let mut code = Code::from_vec(raw);
        code.truncate(len as usize);
        if codebook.insert(symbol, code).is_some() {
            return Err(Error::Container(format!(
                "byte {symbol:#04x} appears twice in the codebook"
            )));
        }
    }

    let payload_len = u64::from_le_bytes(read_array(reader, "payload length")?);
    let mut payload = Vec::new();
    reader.by_ref().take(payload_len).read_to_end(&mut payload)?;
    if payload.len() as u64 != payload_len {
        return Err(Error::Container(format!(
            "payload truncated: expected {payload_len} bytes, found {}",
            payload.len()
        )));
    }
    if reader.read(&mut [0u8; 1])? != 0 {
        return Err(Error::Container("trailing bytes after payload".to_string()));
    }

    let payload = PackedPayload::new(payload, padding)?;
    Ok(Archive::new(codebook, payload))
}

fn read_array<R: Read, const N: usize>(reader: &mut R, what: &str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| truncated(e, what))?;
    Ok(buf)
}

fn truncated(err: io::Error, what: &str) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::Container(format!("truncated while reading {what}"))
    } else {
        Error::Io(err)
    }
}

/// Archive kept in a byte buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    buffer: Vec<u8>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage { buffer: Vec::new() }
    }

    pub fn from_bytes(buffer: Vec<u8>) -> Self {
        MemoryStorage { buffer }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Storage for MemoryStorage {
    fn persist(&mut self, archive: &Archive) -> Result<u64> {
        self.buffer.clear();
        write_archive(&mut self.buffer, archive)
    }

    fn load(&mut self) -> Result<Archive> {
        let mut reader = self.buffer.as_slice();
        read_archive(&mut reader)
    }
}

/// Archive kept in a file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileStorage {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn persist(&mut self, archive: &Archive) -> Result<u64> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        let written = write_archive(&mut writer, archive)?;
        writer.flush()?;
        debug!("wrote {} bytes to {}", written, self.path.display());
        Ok(written)
    }

    fn load(&mut self) -> Result<Archive> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        read_archive(&mut reader)
    }
}
