//! The plain filesystem calls behind the bridge.
//!
//! Paths arrive here already resolved. Errors carry the failing step and
//! path as context.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Write `bytes` to `path`, truncating it; new files get mode 0644 (unix).
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("mkdir {}", parent.display()))?;
        }
    }
    Ok(())
}

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("open {}", path.display()))
}

pub fn move_file(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target)
        .with_context(|| format!("rename {} {}", source.display(), target.display()))
}

/// Remove a file, symlink or whole directory tree. A missing path is not an error.
pub fn remove_all(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).with_context(|| format!("unlinkat {}", path.display())),
    };

    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match removed {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            Err(e).with_context(|| format!("unlinkat {}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Copy the bytes of `src` into `dst`, truncating `dst` if it exists.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    let mut source = File::open(src).with_context(|| format!("open {}", src.display()))?;
    let mut target = File::create(dst).with_context(|| format!("open {}", dst.display()))?;
    let copied = io::copy(&mut source, &mut target)
        .with_context(|| format!("copy {} {}", src.display(), dst.display()))?;
    Ok(copied)
}

pub fn make_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("mkdir {}", path.display()))
}

/// List `path` as `name,size,isDir` records joined by `|`, sorted by name.
///
/// Entries whose metadata cannot be read are left out.
pub fn read_dir(path: &Path) -> Result<String> {
    let mut records = Vec::new();
    for entry in fs::read_dir(path).with_context(|| format!("open {}", path.display()))? {
        let Ok(entry) = entry else { continue };
        let Ok(meta) = entry.metadata() else { continue };
        records.push((
            entry.file_name().to_string_lossy().into_owned(),
            meta.len(),
            meta.is_dir(),
        ));
    }
    records.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(records
        .iter()
        .map(|(name, size, is_dir)| format!("{name},{size},{is_dir}"))
        .collect::<Vec<_>>()
        .join("|"))
}

/// `Ok(false)` only when the path does not exist; other stat errors propagate.
pub fn exists(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("stat {}", path.display())),
    }
}
