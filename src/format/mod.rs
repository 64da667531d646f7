//! Config file formatter
//!
//! Prints a parsed file back in canonical form:
//! - 4-space indentation, one member per line
//! - One blank line between top-level structs
//! - Strings and chars re-escaped, floats always written with a decimal point
//! - Lists longer than the line length split one element per line, with a trailing comma
//!
//! Comments are not preserved.

mod config;
mod formatter;
mod writer;

pub use config::FormatConfig;
pub use formatter::Formatter;

use tcod_config_syntax::SyntaxError;
use tcod_config_syntax::parser;

/// Format config source with default settings
pub fn format_source(source: &str) -> Result<String, Vec<SyntaxError>> {
    format_source_with_config(source, FormatConfig::default())
}

/// Format config source with custom configuration
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn format_source_with_config(source: &str, config: FormatConfig) -> Result<String, Vec<SyntaxError>> {
    let document = parser::parse_source(source)?;
    Ok(Formatter::new(config).format(&document))
}

/// Check if source is already formatted
pub fn check_formatted(source: &str) -> Result<bool, Vec<SyntaxError>> {
    check_formatted_with_config(source, FormatConfig::default())
}

/// Check if source is already formatted under a custom configuration
pub fn check_formatted_with_config(source: &str, config: FormatConfig) -> Result<bool, Vec<SyntaxError>> {
    let formatted = format_source_with_config(source, config)?;
    Ok(source == formatted)
}

/// Get the line-by-line diff between the source and its formatted form
pub fn format_diff(source: &str) -> Result<Option<String>, Vec<SyntaxError>> {
    format_diff_with_config(source, FormatConfig::default())
}

/// Get the line-by-line diff between the source and its form under a custom configuration
pub fn format_diff_with_config(source: &str, config: FormatConfig) -> Result<Option<String>, Vec<SyntaxError>> {
    let formatted = format_source_with_config(source, config)?;
    Ok(line_diff(source, &formatted))
}

/// Diff two texts line by line, `None` when they are equal.
pub fn line_diff(source: &str, formatted: &str) -> Option<String> {
    if source == formatted {
        return None;
    }

    let mut diff = String::new();
    let original_lines: Vec<&str> = source.lines().collect();
    let formatted_lines: Vec<&str> = formatted.lines().collect();

    for i in 0..original_lines.len().max(formatted_lines.len()) {
        let orig = original_lines.get(i).copied().unwrap_or("");
        let fmt = formatted_lines.get(i).copied().unwrap_or("");

        if orig != fmt {
            if !orig.is_empty() {
                diff.push_str(&format!("-{:4} | {}\n", i + 1, orig));
            }
            if !fmt.is_empty() {
                diff.push_str(&format!("+{:4} | {}\n", i + 1, fmt));
            }
        }
    }

    Some(diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // format_source tests
    // ========================================

    #[test]
    fn test_format_source_simple_struct() {
        let source = "item_type \"sword\"{damage=4 two_handed}";
        assert_eq!(
            format_source(source).unwrap(),
            "item_type \"sword\" {\n    damage = 4\n    two_handed\n}\n"
        );
    }

    #[test]
    fn test_format_source_nested_and_spacing() {
        let source = "a { b { x = 1 } }\n\n\n\nc \"n\" { }";
        assert_eq!(
            format_source(source).unwrap(),
            "a {\n    b {\n        x = 1\n    }\n}\n\nc \"n\" {}\n"
        );
    }

    #[test]
    fn test_format_source_values() {
        let source = r#"s { f = 2 t = "a" "b" c = '\n' x = 0x10 g = 3.0 k = #ff8000 l = [1,2,] }"#;
        assert_eq!(
            format_source(source).unwrap(),
            "s {\n    f = 2\n    t = \"ab\"\n    c = '\\n'\n    x = 16\n    g = 3.0\n    k = #FF8000\n    l = [1, 2]\n}\n"
        );
    }

    #[test]
    fn test_format_source_drops_comments() {
        let source = "// header\ns { /* inline */ x = 1 } // trailing\n";
        assert_eq!(format_source(source).unwrap(), "s {\n    x = 1\n}\n");
    }

    #[test]
    fn test_format_source_empty() {
        assert_eq!(format_source("").unwrap(), "");
    }

    #[test]
    fn test_format_source_invalid_syntax() {
        let errors = format_source("s { x = ").unwrap_err();
        assert!(!errors.is_empty());
    }

    // ========================================
    // format_source_with_config tests
    // ========================================

    #[test]
    fn test_format_source_with_indent_width() {
        let config = FormatConfig::new().with_indent_width(2);
        assert_eq!(format_source_with_config("s { x = 1 }", config).unwrap(), "s {\n  x = 1\n}\n");
    }

    #[test]
    fn test_format_source_with_tabs() {
        let config = FormatConfig::new().with_tabs(true);
        assert_eq!(format_source_with_config("s { t { } }", config).unwrap(), "s {\n\tt {}\n}\n");
    }

    #[test]
    fn test_format_source_wraps_long_lists() {
        let config = FormatConfig::new().with_line_length(20);
        assert_eq!(
            format_source_with_config("s { values = [100, 200, 300] }", config).unwrap(),
            "s {\n    values = [\n        100,\n        200,\n        300,\n    ]\n}\n"
        );
    }

    #[test]
    fn test_format_source_without_blank_lines() {
        let config = FormatConfig::new().with_blank_lines_between_structs(0);
        assert_eq!(format_source_with_config("a {} b {}", config).unwrap(), "a {}\nb {}\n");
    }

    // ========================================
    // check_formatted / format_diff tests
    // ========================================

    #[test]
    fn test_check_formatted() {
        assert!(check_formatted("s {\n    x = 1\n}\n").unwrap());
        assert!(!check_formatted("s { x = 1 }").unwrap());
        assert!(check_formatted("s {").is_err());
    }

    #[test]
    fn test_format_diff_no_changes() {
        assert_eq!(format_diff("s {\n    x = 1\n}\n").unwrap(), None);
    }

    #[test]
    fn test_format_diff_with_config_uses_config() {
        let source = "s {\n    x = 1\n}\n";
        let config = FormatConfig::new().with_tabs(true);
        assert!(!check_formatted_with_config(source, config).unwrap());
        let diff = format_diff_with_config(source, config).unwrap().unwrap();
        assert_eq!(diff, "-   2 |     x = 1\n+   2 | \tx = 1\n");
        assert_eq!(format_diff_with_config("s {\n\tx = 1\n}\n", config).unwrap(), None);
    }

    #[test]
    fn test_line_diff_trailing_lines() {
        assert_eq!(line_diff("a\n", "a\n"), None);
        assert_eq!(line_diff("a\nb\n", "a\n").unwrap(), "-   2 | b\n");
    }

    #[test]
    fn test_format_diff_returns_diff() {
        let diff = format_diff("s {\n  x = 1\n}\n").unwrap().unwrap();
        assert_eq!(diff, "-   2 |   x = 1\n+   2 |     x = 1\n");
    }
}
