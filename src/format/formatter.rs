//! Core formatting logic for config files
//!
//! Walks the syntax tree and emits canonical source text.

use tcod_config_syntax::ast::{Document, Member, StructDecl, Value};

use super::config::FormatConfig;
use super::writer::FormatWriter;

/// Formatter that transforms a syntax tree back to formatted source
pub struct Formatter {
    writer: FormatWriter,
    config: FormatConfig,
}

impl Formatter {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            writer: FormatWriter::new(config),
            config,
        }
    }

    /// Format a document and return the formatted source
    pub fn format(mut self, document: &Document) -> String {
        for (i, decl) in document.structs.iter().enumerate() {
            if i > 0 {
                self.writer.blank_lines(self.config.blank_lines_between_structs);
            }
            self.format_struct(&decl.node);
        }
        self.writer.finish()
    }

    // ========================================================================
    // Structs
    // ========================================================================

    fn format_struct(&mut self, decl: &StructDecl) {
        self.writer.write(&decl.type_name.node);
        if let Some(name) = &decl.name {
            self.writer.write(" ");
            self.writer.write(&quote_string(&name.node));
        }

        if decl.members.is_empty() {
            self.writer.writeln(" {}");
            return;
        }

        self.writer.writeln(" {");
        self.writer.indent();
        for member in &decl.members {
            self.format_member(&member.node);
        }
        self.writer.dedent();
        self.writer.writeln("}");
    }

    fn format_member(&mut self, member: &Member) {
        match member {
            Member::Field { name, value } => {
                self.writer.write(&name.node);
                self.writer.write(" = ");
                self.format_value(&value.node);
                self.writer.newline();
            }
            Member::Flag(name) => self.writer.writeln(&name.node),
            Member::Struct(decl) => self.format_struct(decl),
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Write a field value. A list that would overflow the line gets one element per line.
    fn format_value(&mut self, value: &Value) {
        let inline = render_value(value);
        match value {
            Value::List(items) if !items.is_empty() && self.writer.would_exceed_line_length(inline.len()) => {
                self.writer.writeln("[");
                self.writer.indent();
                for item in items {
                    self.writer.write(&render_value(&item.node));
                    self.writer.writeln(",");
                }
                self.writer.dedent();
                self.writer.write("]");
            }
            _ => self.writer.write(&inline),
        }
    }
}

/// Render a value on a single line.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote_string(s),
        Value::Char(c) => quote_char(*c),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => render_float(*f),
        Value::Bool(b) => b.to_string(),
        Value::Color(c) => c.to_string(),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(|item| render_value(&item.node)).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

/// Floats always carry a decimal point so they lex back as floats.
fn render_float(f: f64) -> String {
    let text = f.to_string();
    if text.contains('.') || !f.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn quote_char(c: char) -> String {
    match c {
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        '\n' => "'\\n'".to_string(),
        '\t' => "'\\t'".to_string(),
        '\r' => "'\\r'".to_string(),
        c if (c as u32) < 0x20 || ((c as u32) >= 0x7f && (c as u32) <= 0xff) => format!("'\\x{:02X}'", c as u32),
        c => format!("'{}'", c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_float_keeps_decimal_point() {
        assert_eq!(render_float(1.0), "1.0");
        assert_eq!(render_float(-3.0), "-3.0");
        assert_eq!(render_float(0.25), "0.25");
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string("a\"b\\c\nd"), r#""a\"b\\c\nd""#);
        assert_eq!(quote_string(""), "\"\"");
    }

    #[test]
    fn test_quote_char_escapes() {
        assert_eq!(quote_char('x'), "'x'");
        assert_eq!(quote_char('\''), r"'\''");
        assert_eq!(quote_char('\\'), r"'\\'");
        assert_eq!(quote_char('\u{1}'), r"'\x01'");
        assert_eq!(quote_char('\u{e9}'), r"'\xE9'");
    }

    #[test]
    fn test_render_nested_list() {
        let value = Value::List(vec![
            tcod_config_syntax::Spanned::new(Value::Int(1), Default::default()),
            tcod_config_syntax::Spanned::new(Value::List(vec![]), Default::default()),
        ]);
        assert_eq!(render_value(&value), "[1, []]");
    }
}
