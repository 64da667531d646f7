//! Output writer with indentation tracking

use super::config::FormatConfig;

/// Writer that tracks indentation and builds formatted output
pub struct FormatWriter {
    output: String,
    indent_level: usize,
    config: FormatConfig,
    /// Whether we're at the start of a line
    at_line_start: bool,
    /// Current line width in columns, a tab counting as `indent_width`
    current_line_length: usize,
}

impl FormatWriter {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
            at_line_start: true,
            current_line_length: 0,
        }
    }

    /// Get the formatted output
    pub fn finish(self) -> String {
        self.output
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn indent_columns(&self) -> usize {
        self.indent_level * self.config.indent_width
    }

    /// Write indentation if at line start
    fn write_indent(&mut self) {
        if self.at_line_start {
            if self.config.use_tabs {
                self.output.push_str(&"\t".repeat(self.indent_level));
            } else {
                self.output.push_str(&" ".repeat(self.indent_columns()));
            }
            self.current_line_length = self.indent_columns();
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
        self.current_line_length += s.chars().count();
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
        self.current_line_length = 0;
    }

    /// Write blank lines (for spacing between structs)
    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.newline();
        }
    }

    /// Check if current line would exceed max length with additional text
    pub fn would_exceed_line_length(&self, additional: usize) -> bool {
        let current = if self.at_line_start {
            self.indent_columns()
        } else {
            self.current_line_length
        };
        current + additional > self.config.line_length
    }
}
