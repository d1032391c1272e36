//! Figure source resolution and page-image cache.
//!
//! A `[FIG ...]` directive names a PDF by file name only. The resolver looks
//! for it across an ordered list of candidate directories and maps the
//! requested page and zoom to a PNG path in the asset cache. Rasterizing the
//! page is left to a [`Rasterizer`] supplied by the caller.

mod root;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Figure;

pub use root::{
    find_subject_root, find_subject_root_with, looks_like_subject_root, MARKERS, PRACTICE_DIR,
    SUBJECT_ROOT_ENV, THEORY_DIR, WORKSHOP_DIR,
};

/// Name of the cache folder created under the output directory.
pub const CACHE_DIR_NAME: &str = "_cache";

/// Whether a page image already exists in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Cached,
    Missing,
}

/// A figure with its source PDF located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFigure {
    /// Path of the source PDF
    pub source: PathBuf,

    /// Path of the page image in the cache
    pub cache_path: PathBuf,

    /// Cache state at resolution time
    pub status: CacheStatus,
}

/// Renders one PDF page to a PNG file.
pub trait Rasterizer {
    /// Write page `page` (1-based) of `pdf` at `zoom` to `out`.
    fn rasterize(&self, pdf: &Path, page: u32, zoom: f64, out: &Path) -> Result<()>;
}

/// Cache key for a figure, relative to the cache directory:
/// `<pdf stem>/p<page:03>_z<zoom>.png`.
pub fn cache_key(figure: &Figure) -> PathBuf {
    let stem = Path::new(&figure.file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| figure.file.clone());
    PathBuf::from(stem).join(format!("p{:03}_z{}.png", figure.page, figure.zoom))
}

/// Default cache directory for a document: `<output_dir>/_cache/<document stem>`.
pub fn default_cache_dir(output_dir: &Path, document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(CACHE_DIR_NAME).join(stem)
}

/// Locates figure sources and their cached page images.
#[derive(Debug, Clone)]
pub struct FigureResolver {
    candidates: Vec<PathBuf>,
    cache_dir: PathBuf,
}

impl FigureResolver {
    /// Create a resolver searching, in order: the document folder, the
    /// theory, practice and workshop folders of the subject, then the
    /// subject root itself.
    pub fn new(
        document_dir: impl Into<PathBuf>,
        subject_root: impl AsRef<Path>,
        cache_dir: impl Into<PathBuf>,
    ) -> Self {
        let root = subject_root.as_ref();
        let candidates = vec![
            document_dir.into(),
            root.join(THEORY_DIR),
            root.join(PRACTICE_DIR),
            root.join(WORKSHOP_DIR),
            root.to_path_buf(),
        ];
        Self::with_candidates(candidates, cache_dir)
    }

    /// Create a resolver with an explicit candidate list.
    pub fn with_candidates(candidates: Vec<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            candidates,
            cache_dir: cache_dir.into(),
        }
    }

    /// Candidate directories, in search order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Find `file` in the first candidate directory that contains it.
    pub fn find_source(&self, file: &str) -> Result<PathBuf> {
        let searched: Vec<PathBuf> = self.candidates.iter().map(|dir| dir.join(file)).collect();
        match searched.iter().find(|p| p.is_file()) {
            Some(found) => Ok(found.clone()),
            None => Err(Error::FigureNotFound {
                file: file.to_string(),
                searched,
            }),
        }
    }

    /// Absolute cache path for a figure.
    pub fn cache_path(&self, figure: &Figure) -> PathBuf {
        self.cache_dir.join(cache_key(figure))
    }

    /// Locate the source PDF and check the cache.
    ///
    /// The cache check is existence only: a changed PDF with the same name,
    /// page and zoom keeps serving the old image.
    pub fn resolve(&self, figure: &Figure) -> Result<ResolvedFigure> {
        let source = self.find_source(&figure.file)?;
        let cache_path = self.cache_path(figure);
        let status = if cache_path.is_file() {
            CacheStatus::Cached
        } else {
            CacheStatus::Missing
        };
        log::debug!(
            "figure {} p{}: {:?} at {}",
            figure.file,
            figure.page,
            status,
            cache_path.display()
        );
        Ok(ResolvedFigure {
            source,
            cache_path,
            status,
        })
    }

    /// Resolve a figure and rasterize it when the cache has no image yet.
    pub fn ensure_cached(
        &self,
        figure: &Figure,
        rasterizer: &dyn Rasterizer,
    ) -> Result<ResolvedFigure> {
        let mut resolved = self.resolve(figure)?;
        if resolved.status == CacheStatus::Missing {
            if let Some(parent) = resolved.cache_path.parent() {
                fs::create_dir_all(parent)?;
            }
            rasterizer.rasterize(&resolved.source, figure.page, figure.zoom, &resolved.cache_path)?;
            resolved.status = CacheStatus::Cached;
        }
        Ok(resolved)
    }
}
