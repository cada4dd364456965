//! prefix-compress CLI
//!
//! Compress a file with Huffman or Shannon-Fano coding, verify that the
//! written archive decodes back to the original, and print a performance
//! report.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use prefix_codec::compression::codebook::render_code;
use prefix_codec::storage::{FileStorage, Storage};
use prefix_codec::{Algorithm, Codec, CodecConfig};

/// Lossless file compression with Huffman or Shannon-Fano prefix codes.
#[derive(Parser, Debug)]
#[command(name = "prefix-compress")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into `<stem>.<algo>.bin` next to it
    Compress {
        /// File to compress
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Prefix-code algorithm
        #[arg(short, long, value_enum, default_value = "huffman")]
        algo: AlgoArg,

        /// Archive path (defaults to `<stem>.<algo>.bin`)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Skip the decode-and-compare check
        #[arg(long)]
        no_verify: bool,
    },
    /// Restore the original bytes from an archive
    Decompress {
        /// Archive to read
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        /// Where to write the restored bytes
        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Print the header and codebook of an archive
    Inspect {
        /// Archive to read
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgoArg {
    /// Huffman coding (optimal)
    Huffman,
    /// Shannon-Fano coding
    Shannon,
}

impl From<AlgoArg> for Algorithm {
    fn from(arg: AlgoArg) -> Self {
        match arg {
            AlgoArg::Huffman => Algorithm::Huffman,
            AlgoArg::Shannon => Algorithm::ShannonFano,
        }
    }
}

impl AlgoArg {
    fn suffix(self) -> &'static str {
        match self {
            AlgoArg::Huffman => "huffman",
            AlgoArg::Shannon => "shannon",
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Command::Compress {
            input,
            algo,
            output,
            no_verify,
        } => {
            let output = output.unwrap_or_else(|| default_output(&input, algo));
            compress(&input, &output, algo.into(), !no_verify)
        }
        Command::Decompress { archive, output } => decompress(&archive, &output),
        Command::Inspect { archive } => inspect(&archive),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn default_output(input: &Path, algo: AlgoArg) -> PathBuf {
    input.with_extension(format!("{}.bin", algo.suffix()))
}

fn compress(
    input: &Path,
    output: &Path,
    algorithm: Algorithm,
    verify: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    if data.is_empty() {
        println!("{} is empty, nothing to compress.", input.display());
        return Ok(());
    }

    println!("Running {algorithm} on {} ({} bytes)...", input.display(), data.len());
    let codec = Codec::new(
        CodecConfig::default()
            .with_algorithm(algorithm)
            .with_verify(verify),
    );
    let report = codec.compress_to(&data, &mut FileStorage::new(output))?;
    if verify {
        println!("Integrity check passed: data perfectly reconstructed.");
    }
    println!();
    println!("{report}");
    println!("Compressed file saved to: {}", output.display());
    Ok(())
}

fn decompress(archive: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let codec = Codec::default();
    let data = codec.decompress_from(&mut FileStorage::new(archive))?;
    fs::write(output, &data)?;
    println!("Restored {} bytes to {}", data.len(), output.display());
    Ok(())
}

fn inspect(archive: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let archive = FileStorage::new(archive).load()?;
    let payload = archive.payload();
    println!("Padding bits:    {}", payload.padding());
    println!("Codebook size:   {} symbols", archive.codebook().len());
    println!(
        "Payload:         {} bytes ({} bits)",
        payload.bytes().len(),
        payload.bit_len()
    );
    println!();
    for (symbol, code) in archive.codebook().iter() {
        let shown = if symbol.is_ascii_graphic() {
            format!("'{}'", symbol as char)
        } else {
            "   ".to_string()
        };
        println!("  {symbol:#04x} {shown}  {}", render_code(code));
    }
    Ok(())
}
