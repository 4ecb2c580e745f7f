//! # fsbridge
//!
//! A synchronous file-system bridge meant to be called across a process or
//! language boundary.
//!
//! Every operation takes raw path strings and returns a [`FlagResult`]
//! (`ok` flag plus one message) instead of a structured error, so the outcome
//! survives any text-only transport.
//!
//! ## Features
//!
//! - Read/write files as text or base64-encoded binary
//! - Move, copy, remove files; create and list directories
//! - Resolve paths against a configurable base directory
//! - Extract ZIP archives with Zip-Slip protection
//! - Decompress single-stream GZip files
//!
//! ## Example
//!
//! ```no_run
//! use fsbridge::{Bridge, IOOptions, PathResolver};
//!
//! let bridge = Bridge::new(PathResolver::new("/srv/app"));
//!
//! let result = bridge.unzip_zip_file("downloads/bundle.zip", "bundle");
//! if !result.ok {
//!     eprintln!("extraction failed: {}", result.message);
//! }
//!
//! let logo = bridge.read_file("bundle/logo.png", IOOptions::binary());
//! println!("{}", logo.message);
//! ```

pub mod bridge;
pub mod cli;
pub mod gzip;
pub mod io;
pub mod observe;
pub mod path;
pub mod serve;
pub mod zip;

pub use bridge::{Bridge, FlagResult, IOOptions, Mode, Request, SUCCESS};
pub use cli::Cli;
pub use io::{LocalFileReader, ReadAt, SectionReader};
pub use observe::{CallLog, LogCallLog, SilentCallLog};
pub use path::PathResolver;
pub use serve::serve;
pub use zip::{UnsafeEntryPath, ZipExtractor, ZipFileEntry};
