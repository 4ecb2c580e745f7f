//! GZip decompression.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

/// Decompress a gzip stream from `reader` into `writer`.
///
/// Concatenated members are decoded one after another into the same output.
/// Anything after a member that is not another gzip member is an error.
pub fn decompress<R: Read, W: Write>(reader: R, writer: &mut W) -> io::Result<u64> {
    let mut decoder = MultiGzDecoder::new(reader);
    io::copy(&mut decoder, writer)
}

/// Decompress the gzip file at `input` into a new file at `output`.
///
/// `output` is created (or truncated) before the stream is decoded, so a
/// corrupt input leaves a partial or empty output file behind.
pub fn decompress_file(input: &Path, output: &Path) -> Result<u64> {
    let source = File::open(input).with_context(|| format!("open {}", input.display()))?;
    let mut target = File::create(output).with_context(|| format!("create {}", output.display()))?;

    let written = decompress(BufReader::new(source), &mut target)
        .with_context(|| format!("gzip: decompress {}", input.display()))?;
    target
        .flush()
        .with_context(|| format!("write {}", output.display()))?;

    Ok(written)
}
