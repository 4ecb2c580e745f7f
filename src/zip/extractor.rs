use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::path::Path;

use flate2::read::DeflateDecoder;
use log::debug;

use crate::io::{ReadAt, SectionReader};
use crate::path::{enclosed_path, normalize_lexical};
use anyhow::{Context, Result, bail};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// An entry whose name would place it outside the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsafeEntryPath {
    pub name: String,
}

impl fmt::Display for UnsafeEntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid file path: {}", self.name)
    }
}

impl std::error::Error for UnsafeEntryPath {}

/// ZIP file extractor
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all entries in the archive
    pub fn list_files(&self) -> Result<Vec<ZipFileEntry>> {
        self.parser.list_files()
    }

    /// Open a streaming reader over the decompressed contents of `entry`.
    ///
    /// The stream fails with [`io::ErrorKind::InvalidData`] at its end if the
    /// bytes do not match the size and CRC-32 recorded in the archive.
    pub fn open_entry(&self, entry: &ZipFileEntry) -> Result<Box<dyn Read + '_>> {
        if entry.is_encrypted() {
            bail!("zip: {}: encrypted entries are not supported", entry.file_name);
        }

        let data_offset = self.parser.get_data_offset(entry)?;
        let raw = SectionReader::new(self.parser.reader(), data_offset, entry.compressed_size);

        let stream: Box<dyn Read + '_> = match entry.compression_method {
            CompressionMethod::Stored => Box::new(raw),
            CompressionMethod::Deflate => Box::new(DeflateDecoder::new(raw)),
            CompressionMethod::Unknown(method) => bail!(
                "zip: {}: unsupported compression method {}",
                entry.file_name,
                method
            ),
        };

        Ok(Box::new(ChecksumReader::new(
            stream,
            entry.crc32,
            entry.uncompressed_size,
        )))
    }

    /// Extract a file entry to disk, returning the number of bytes written.
    ///
    /// Missing parent directories are created. An existing file is truncated;
    /// a new one gets the entry's permission bits (unix only).
    pub fn extract_to_file(&self, entry: &ZipFileEntry, output_path: &Path) -> Result<u64> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("mkdir {}", parent.display()))?;
            }
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(entry.permissions());
        }
        let mut file = options
            .open(output_path)
            .with_context(|| format!("open {}", output_path.display()))?;

        let mut stream = self.open_entry(entry)?;
        let written = io::copy(&mut stream, &mut file)
            .with_context(|| format!("zip: extract {}", entry.file_name))?;

        Ok(written)
    }

    /// Extract every entry into `output_dir`, in archive order.
    ///
    /// Each entry's target must stay strictly inside `output_dir`; the first
    /// entry that does not stops extraction with [`UnsafeEntryPath`]. The
    /// first failure of any kind aborts the run and entries already written
    /// stay on disk.
    ///
    /// Returns the number of entries extracted.
    pub fn extract_all(&self, output_dir: &Path) -> Result<usize> {
        let root = normalize_lexical(output_dir);
        let entries = self.list_files()?;

        for entry in &entries {
            let Some(target) = enclosed_path(&root, &entry.file_name) else {
                return Err(UnsafeEntryPath {
                    name: entry.file_name.clone(),
                }
                .into());
            };

            if entry.is_dir() {
                debug!("   creating: {}", entry.file_name);
                fs::create_dir_all(&target)
                    .with_context(|| format!("mkdir {}", target.display()))?;
                continue;
            }

            debug!("  extracting: {}", entry.file_name);
            self.extract_to_file(entry, &target)?;
        }

        Ok(entries.len())
    }
}

/// Verifies size and CRC-32 of a decompressed entry stream as it is read.
struct ChecksumReader<R> {
    inner: R,
    hasher: crc32fast::Hasher,
    expected_crc: u32,
    expected_size: u64,
    read: u64,
    verified: bool,
}

impl<R: Read> ChecksumReader<R> {
    fn new(inner: R, expected_crc: u32, expected_size: u64) -> Self {
        Self {
            inner,
            hasher: crc32fast::Hasher::new(),
            expected_crc,
            expected_size,
            read: 0,
            verified: false,
        }
    }

    fn verify(&mut self) -> io::Result<()> {
        if self.verified {
            return Ok(());
        }
        self.verified = true;

        if self.read != self.expected_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "zip: size mismatch (expected {} bytes, got {})",
                    self.expected_size, self.read
                ),
            ));
        }
        if self.hasher.clone().finalize() != self.expected_crc {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "zip: checksum error"));
        }
        Ok(())
    }
}

impl<R: Read> Read for ChecksumReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let n = self.inner.read(buf)?;
        if n == 0 {
            self.verify()?;
            return Ok(0);
        }

        self.hasher.update(&buf[..n]);
        self.read += n as u64;
        if self.read > self.expected_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "zip: entry is larger than recorded",
            ));
        }
        Ok(n)
    }
}
