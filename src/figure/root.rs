//! Subject root discovery.
//!
//! A subject root is a directory holding at least one of the `Practico`,
//! `Teorico` or `Taller` folders.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable that overrides subject root discovery.
pub const SUBJECT_ROOT_ENV: &str = "TXTPDF_SUBJECT_ROOT";

/// Folder names that mark a subject root.
pub const MARKERS: &[&str] = &["Practico", "Teorico", "Taller"];

/// Theory folder name.
pub const THEORY_DIR: &str = "Teorico";

/// Practice folder name.
pub const PRACTICE_DIR: &str = "Practico";

/// Workshop folder name.
pub const WORKSHOP_DIR: &str = "Taller";

/// Find the subject root for `start` (a file or directory).
///
/// `TXTPDF_SUBJECT_ROOT` wins when it points at a valid root; otherwise
/// `start` and its ancestors are searched.
pub fn find_subject_root(start: &Path) -> Result<PathBuf> {
    let env_root = env::var_os(SUBJECT_ROOT_ENV).map(PathBuf::from);
    find_subject_root_with(start, env_root.as_deref())
}

/// Like [`find_subject_root`] with an explicit override instead of the environment.
pub fn find_subject_root_with(start: &Path, root_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = root_override {
        if looks_like_subject_root(root) {
            return Ok(root.to_path_buf());
        }
        log::warn!(
            "{} does not contain {}, ignoring override",
            root.display(),
            MARKERS.join("/")
        );
    }

    let mut base = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    if base.is_file() {
        if let Some(parent) = base.parent() {
            base = parent.to_path_buf();
        }
    }

    let named_marker = base
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| MARKERS.contains(&n));
    if named_marker {
        if let Some(parent) = base.parent().filter(|p| looks_like_subject_root(p)) {
            return Ok(parent.to_path_buf());
        }
    }

    base.ancestors()
        .find(|p| looks_like_subject_root(p))
        .map(Path::to_path_buf)
        .ok_or(Error::SubjectRootNotFound(base.clone()))
}

/// Check if `dir` contains any marker folder.
pub fn looks_like_subject_root(dir: &Path) -> bool {
    dir.is_dir() && MARKERS.iter().any(|m| dir.join(m).is_dir())
}
