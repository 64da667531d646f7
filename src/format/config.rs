//! Formatting configuration for config files

/// Formatting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Indent with one tab per level instead of spaces
    pub use_tabs: bool,
    /// Maximum line length before a list is split over several lines
    pub line_length: usize,
    /// Number of blank lines between top-level structs
    pub blank_lines_between_structs: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            use_tabs: false,
            line_length: 100,
            blank_lines_between_structs: 1,
        }
    }
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    /// Set the maximum line length
    pub fn with_line_length(mut self, length: usize) -> Self {
        self.line_length = length;
        self
    }

    pub fn with_blank_lines_between_structs(mut self, count: usize) -> Self {
        self.blank_lines_between_structs = count;
        self
    }
}
