//! Path resolution for bridge calls.
//!
//! Every path a caller hands to the bridge goes through [`PathResolver`]
//! before it reaches the OS. Resolution is purely lexical: nothing here
//! touches the filesystem, so it cannot fail and never follows symlinks.

use std::path::{Component, Path, PathBuf};

/// Turns caller-supplied path strings into absolute, normalized paths.
///
/// Relative inputs are anchored at the configured base directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    /// Create a resolver anchored at `base`.
    ///
    /// A relative base is made absolute against the process working
    /// directory when that is available, and kept as given otherwise.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let base = if base.is_absolute() {
            base
        } else {
            match std::env::current_dir() {
                Ok(cwd) => cwd.join(base),
                Err(_) => base,
            }
        };
        Self {
            base: normalize_lexical(&base),
        }
    }

    /// Create a resolver anchored at the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `raw` against the base directory.
    ///
    /// Idempotent: resolving an already resolved path returns it unchanged.
    pub fn resolve(&self, raw: impl AsRef<Path>) -> PathBuf {
        let raw = raw.as_ref();
        if raw.is_absolute() {
            normalize_lexical(raw)
        } else {
            normalize_lexical(&self.base.join(raw))
        }
    }
}

/// Lexically normalize a path: drop `.` segments, fold `..` into the
/// preceding segment.
///
/// `..` directly under the root is a no-op; leading `..` of a relative
/// path is kept.
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
        }
    }

    out
}

/// Join an archive entry name onto `root`, returning the target only if it
/// stays strictly inside `root` after normalization.
///
/// `root` must already be normalized. Names that climb out with `..`,
/// absolute names, and names that resolve to `root` itself are refused.
pub fn enclosed_path(root: &Path, name: &str) -> Option<PathBuf> {
    let candidate = normalize_lexical(&root.join(name));
    (candidate != root && candidate.starts_with(root)).then_some(candidate)
}
