//! ZIP archive parsing and extraction.
//!
//! This module provides functionality for reading and extracting ZIP archives,
//! supporting both standard ZIP format and ZIP64 extensions for large archives.
//!
//! ## Architecture
//!
//! The module is organized into three main components:
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`extractor`]: Entry streams and directory-confined extraction
//!
//! ## Path Safety
//!
//! [`ZipExtractor::extract_all`] joins every entry name onto the output
//! directory and refuses any entry that would land outside it (Zip-Slip),
//! whether through `..` segments or an absolute name.
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 extensions for files > 4GB
//! - STORED (no compression) and DEFLATE methods
//! - CRC-32 verification while streaming
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods

mod extractor;
mod parser;
mod structures;

pub use extractor::{UnsafeEntryPath, ZipExtractor};
pub use parser::ZipParser;
pub use structures::*;
