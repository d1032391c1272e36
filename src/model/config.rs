//! Document configuration from the `[DOC ...]` header.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Keys accepted in the `[DOC ...]` header.
pub const ALLOWED_KEYS: &[&str] = &[
    "out",
    "title",
    "subtitle",
    "meta_line",
    "include_title_block",
    "include_toc",
    "toc_title",
    "toc_max_level",
    "footer_left",
    "footer_center",
    "footer_right",
    "footer_show_page",
    "footer_link_to_toc",
    "author",
    "subject",
    "keywords",
    "system",
    "contacto",
];

/// Default TOC title.
pub const DEFAULT_TOC_TITLE: &str = "Contenido";

/// Default deepest heading level listed in the TOC.
pub const DEFAULT_TOC_MAX_LEVEL: i64 = 3;

/// Declared type of a header key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    String,
    Bool,
    Int,
}

/// Get the declared type of a whitelisted key.
pub fn key_type(key: &str) -> Option<KeyType> {
    match key {
        "include_title_block" | "include_toc" | "footer_show_page" | "footer_link_to_toc" => {
            Some(KeyType::Bool)
        }
        "toc_max_level" => Some(KeyType::Int),
        k if ALLOWED_KEYS.contains(&k) => Some(KeyType::String),
        _ => None,
    }
}

/// Per-document settings consumed by the layout stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Output file name
    pub out: Option<String>,

    /// Title block heading
    pub title: Option<String>,

    /// Title block subtitle
    pub subtitle: Option<String>,

    /// Small line under the subtitle
    pub meta_line: Option<String>,

    /// Draw the title block on the first page
    pub include_title_block: bool,

    /// Emit a table of contents
    pub include_toc: bool,

    /// TOC heading
    pub toc_title: String,

    /// Deepest heading level listed in the TOC
    pub toc_max_level: i64,

    /// Footer columns
    pub footer_left: Option<String>,
    pub footer_center: Option<String>,
    pub footer_right: Option<String>,

    /// Print the page number in the footer
    pub footer_show_page: bool,

    /// Explicit footer-to-TOC link setting; see [`DocumentConfig::footer_link_to_toc`]
    pub footer_link_to_toc: Option<bool>,

    /// PDF metadata
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,

    /// Fallback for `footer_left`
    pub system: Option<String>,

    /// Fallback for `footer_center`
    pub contacto: Option<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            out: None,
            title: None,
            subtitle: None,
            meta_line: None,
            include_title_block: true,
            include_toc: true,
            toc_title: DEFAULT_TOC_TITLE.to_string(),
            toc_max_level: DEFAULT_TOC_MAX_LEVEL,
            footer_left: None,
            footer_center: None,
            footer_right: None,
            footer_show_page: true,
            footer_link_to_toc: None,
            author: None,
            subject: None,
            keywords: None,
            system: None,
            contacto: None,
        }
    }
}

impl DocumentConfig {
    /// Output file name for a document living in `folder`.
    ///
    /// Uses the basename of `out` (directories are stripped) with a `.pdf`
    /// extension, or `<folder name>Resumen.pdf` when `out` is unset.
    pub fn output_file_name(&self, folder: &Path) -> String {
        let explicit = self
            .out
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| Path::new(s).file_name())
            .map(|name| name.to_string_lossy().into_owned());

        let name = match explicit {
            Some(name) => name,
            None => {
                let stem = folder
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("{}Resumen.pdf", stem)
            }
        };

        let path = Path::new(&name);
        let is_pdf = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf {
            name
        } else {
            path.with_extension("pdf").to_string_lossy().into_owned()
        }
    }

    /// Title, or `fallback` (usually the source file stem) when unset.
    pub fn title_or(&self, fallback: &str) -> String {
        self.title.clone().unwrap_or_else(|| fallback.to_string())
    }

    /// Left footer column, falling back to `system`.
    pub fn footer_left(&self) -> Option<&str> {
        self.footer_left.as_deref().or(self.system.as_deref())
    }

    /// Center footer column, falling back to `contacto`.
    pub fn footer_center(&self) -> Option<&str> {
        self.footer_center.as_deref().or(self.contacto.as_deref())
    }

    /// Whether the footer links back to the TOC. Defaults to `include_toc`.
    pub fn footer_link_to_toc(&self) -> bool {
        self.footer_link_to_toc.unwrap_or(self.include_toc)
    }

    /// Check if a heading at `level` is listed in the TOC.
    pub fn toc_includes_level(&self, level: u8) -> bool {
        i64::from(level) <= self.toc_max_level
    }
}
