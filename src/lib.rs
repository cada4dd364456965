pub mod compression;
pub mod error;
pub mod report;
pub mod storage;

pub use compression::{Algorithm, Codec, CodecConfig, Compression, PrefixCodeBuilder};
pub use error::{Error, Result};
pub use report::CompressionReport;
pub use storage::{Archive, FileStorage, MemoryStorage, Storage};
