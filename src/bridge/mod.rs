//! The caller-facing bridge.
//!
//! Every method takes raw path strings, resolves them through the
//! [`PathResolver`], performs one filesystem action and reports back a
//! [`FlagResult`]. No method returns an error or panics on I/O failure.

mod fileio;
mod options;
mod request;
mod result;

pub use options::{IOOptions, Mode};
pub use request::Request;
pub use result::{FlagResult, SUCCESS};

use anyhow::{Context, Result};

use crate::gzip;
use crate::io::LocalFileReader;
use crate::observe::{CallLog, LogCallLog};
use crate::path::PathResolver;
use crate::zip::ZipExtractor;

/// Synchronous file-system bridge.
pub struct Bridge {
    resolver: PathResolver,
    log: Box<dyn CallLog>,
}

impl Bridge {
    /// Create a bridge that logs calls through the `log` facade.
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            log: Box::new(LogCallLog),
        }
    }

    /// Replace the call log.
    pub fn with_call_log(mut self, log: impl CallLog + 'static) -> Self {
        self.log = Box::new(log);
        self
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    fn run(&self, op: &str, action: impl FnOnce() -> Result<String>) -> FlagResult {
        let result = FlagResult::from(action());
        if !result.ok {
            self.log.failed(op, &result.message);
        }
        result
    }

    /// Write `content` to `path`, decoding it first in binary mode.
    pub fn write_file(&self, path: &str, content: &str, options: IOOptions) -> FlagResult {
        self.log.call("Writefile", format_args!("Writefile [{}]: {}", options.mode, path));

        self.run("Writefile", || {
            let path = self.resolver.resolve(path);
            fileio::create_parent_dirs(&path)?;
            let bytes = options
                .mode
                .decode(content)
                .context("decode base64 content")?;
            fileio::write_file(&path, &bytes)?;
            Ok(SUCCESS.to_string())
        })
    }

    /// Read `path`, returning its content as text or base64.
    pub fn read_file(&self, path: &str, options: IOOptions) -> FlagResult {
        self.log.call("Readfile", format_args!("Readfile [{}]: {}", options.mode, path));

        self.run("Readfile", || {
            let bytes = fileio::read_file(&self.resolver.resolve(path))?;
            Ok(options.mode.encode(&bytes))
        })
    }

    pub fn move_file(&self, source: &str, target: &str) -> FlagResult {
        self.log.call("Movefile", format_args!("Movefile: {source} -> {target}"));

        self.run("Movefile", || {
            let source = self.resolver.resolve(source);
            let target = self.resolver.resolve(target);
            fileio::move_file(&source, &target)?;
            Ok(SUCCESS.to_string())
        })
    }

    /// Remove a file or directory tree. Missing paths count as removed.
    pub fn remove_file(&self, path: &str) -> FlagResult {
        self.log.call("RemoveFile", format_args!("RemoveFile: {path}"));

        self.run("RemoveFile", || {
            fileio::remove_all(&self.resolver.resolve(path))?;
            Ok(SUCCESS.to_string())
        })
    }

    pub fn copy_file(&self, src: &str, dst: &str) -> FlagResult {
        self.log.call("Copyfile", format_args!("Copyfile: {src} -> {dst}"));

        self.run("Copyfile", || {
            let src = self.resolver.resolve(src);
            let dst = self.resolver.resolve(dst);
            fileio::copy_file(&src, &dst)?;
            Ok(SUCCESS.to_string())
        })
    }

    pub fn make_dir(&self, path: &str) -> FlagResult {
        self.log.call("Makedir", format_args!("Makedir: {path}"));

        self.run("Makedir", || {
            fileio::make_dir(&self.resolver.resolve(path))?;
            Ok(SUCCESS.to_string())
        })
    }

    /// List a directory as `name,size,isDir` records joined by `|`.
    pub fn read_dir(&self, path: &str) -> FlagResult {
        self.log.call("Readdir", format_args!("Readdir: {path}"));

        self.run("Readdir", || fileio::read_dir(&self.resolver.resolve(path)))
    }

    /// Resolve `path` without touching the filesystem. Always succeeds.
    pub fn absolute_path(&self, path: &str) -> FlagResult {
        self.log.call("AbsolutePath", format_args!("AbsolutePath: {path}"));

        FlagResult::success(self.resolver.resolve(path).to_string_lossy())
    }

    /// Extract every entry of the ZIP archive at `path` into `output`.
    ///
    /// Stops at the first entry that would escape `output`; entries written
    /// before a failure are left in place.
    pub fn unzip_zip_file(&self, path: &str, output: &str) -> FlagResult {
        self.log.call("UnzipZIPFile", format_args!("UnzipZIPFile: {path} -> {output}"));

        self.run("UnzipZIPFile", || {
            let path = self.resolver.resolve(path);
            let output = self.resolver.resolve(output);

            let reader = LocalFileReader::new(&path)?;
            ZipExtractor::new(reader).extract_all(&output)?;
            Ok(SUCCESS.to_string())
        })
    }

    /// Decompress the single-stream gzip file at `path` into `output`.
    pub fn unzip_gz_file(&self, path: &str, output: &str) -> FlagResult {
        self.log.call("UnzipGZFile", format_args!("UnzipGZFile: {path} -> {output}"));

        self.run("UnzipGZFile", || {
            let path = self.resolver.resolve(path);
            let output = self.resolver.resolve(output);
            gzip::decompress_file(&path, &output)?;
            Ok(SUCCESS.to_string())
        })
    }

    /// `"true"` or `"false"`; fails only on stat errors other than not-found.
    pub fn file_exists(&self, path: &str) -> FlagResult {
        self.log.call("FileExists", format_args!("FileExists: {path}"));

        self.run("FileExists", || {
            let found = fileio::exists(&self.resolver.resolve(path))?;
            Ok(found.to_string())
        })
    }

    /// Route a decoded host request to the matching method.
    pub fn dispatch(&self, request: &Request) -> FlagResult {
        match request {
            Request::WriteFile {
                path,
                content,
                options,
            } => self.write_file(path, content, *options),
            Request::ReadFile { path, options } => self.read_file(path, *options),
            Request::MoveFile { source, target } => self.move_file(source, target),
            Request::RemoveFile { path } => self.remove_file(path),
            Request::CopyFile { src, dst } => self.copy_file(src, dst),
            Request::MakeDir { path } => self.make_dir(path),
            Request::ReadDir { path } => self.read_dir(path),
            Request::AbsolutePath { path } => self.absolute_path(path),
            Request::UnzipZip { path, output } => self.unzip_zip_file(path, output),
            Request::UnzipGz { path, output } => self.unzip_gz_file(path, output),
            Request::FileExists { path } => self.file_exists(path),
        }
    }
}
