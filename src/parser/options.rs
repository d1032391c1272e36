//! Parsing options and configuration.

/// Default maximum callout nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default figure zoom when a `[FIG ...]` directive gives none.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Options for parsing source documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Maximum callout nesting depth
    pub max_depth: usize,

    /// Zoom used for figures without an explicit `zoom=`
    pub default_zoom: f64,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable strict mode (unknown keys and callout kinds are errors).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable lenient mode (unknown keys are warned about and ignored).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the maximum callout nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the default figure zoom.
    pub fn with_default_zoom(mut self, zoom: f64) -> Self {
        self.default_zoom = zoom;
        self
    }

    /// Check if strict mode is enabled.
    pub fn is_strict(&self) -> bool {
        self.error_mode == ErrorMode::Strict
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Unknown header keys and callout kinds are errors
    Strict,
    /// Unknown header keys are ignored with a warning
    #[default]
    Lenient,
}
