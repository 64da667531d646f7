//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use miette::{NamedSource, Report};
use serde_json::{Map, Value as Json, json};
use tcod_config_syntax::ast::{Document, Member, StructDecl, Value};
use tcod_config_syntax::{SyntaxError, lexer, parser};

use crate::format::{FormatConfig, format_source_with_config, line_diff};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (16 MB)
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Read a source file, rejecting files larger than [`MAX_SOURCE_SIZE`].
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Render syntax errors against their source, one report per error.
pub fn render_syntax_errors(file_path: &str, source: &str, errors: Vec<SyntaxError>) -> String {
    let mut msg = String::new();
    for err in errors {
        let report = Report::new(err).with_source_code(NamedSource::new(file_path, source.to_string()));
        msg.push_str(&format!("{:?}\n", report));
    }
    msg
}

fn parse_or_fail(file_path: &str, source: &str) -> CliResult<Document> {
    parser::parse_source(source)
        .map_err(|errors| CliError::failure(render_syntax_errors(file_path, source, errors).trim_end()))
}

// ============================================================================
// lex / check / dump
// ============================================================================

/// Print one token per line with its byte span.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source)
        .map_err(|errors| CliError::failure(render_syntax_errors(file_path, &source, errors).trim_end()))?;

    for tok in &tokens {
        println!("{:>5}..{:<5} {}", tok.span.start, tok.span.end, tok.kind);
    }
    Ok(ExitCode::SUCCESS)
}

/// Lex and parse, reporting every diagnostic.
pub fn check_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let document = parse_or_fail(file_path, &source)?;

    println!(
        "✓ {}: {} struct(s), {} member(s)",
        file_path,
        document.structs.len(),
        count_members(&document)
    );
    Ok(ExitCode::SUCCESS)
}

fn count_members(document: &Document) -> usize {
    fn walk(decl: &StructDecl) -> usize {
        decl.members
            .iter()
            .map(|m| match &m.node {
                Member::Struct(inner) => 1 + walk(inner),
                _ => 1,
            })
            .sum()
    }
    document.structs.iter().map(|s| walk(&s.node)).sum()
}

/// Print the syntax tree as JSON.
pub fn dump_file(file_path: &str, compact: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let document = parse_or_fail(file_path, &source)?;

    let json = document_to_json(&document);
    let text = if compact {
        serde_json::to_string(&json)
    } else {
        serde_json::to_string_pretty(&json)
    }
    .map_err(|e| CliError::failure(format!("Error serializing syntax tree: {}", e)))?;

    println!("{}", text);
    Ok(ExitCode::SUCCESS)
}

pub fn document_to_json(document: &Document) -> Json {
    Json::Array(document.structs.iter().map(|s| struct_to_json(&s.node)).collect())
}

fn struct_to_json(decl: &StructDecl) -> Json {
    let mut fields = Map::new();
    let mut structs = Vec::new();
    for member in &decl.members {
        match &member.node {
            Member::Field { name, value } => {
                fields.insert(name.node.clone(), value_to_json(&value.node));
            }
            Member::Flag(name) => {
                fields.insert(name.node.clone(), Json::Bool(true));
            }
            Member::Struct(inner) => structs.push(struct_to_json(inner)),
        }
    }

    json!({
        "type": decl.type_name.node,
        "name": decl.name.as_ref().map(|n| n.node.as_str()),
        "fields": fields,
        "structs": structs,
    })
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Char(c) => Json::String(c.to_string()),
        Value::Int(i) => match (i64::try_from(*i), u64::try_from(*i)) {
            (Ok(signed), _) => json!(signed),
            (_, Ok(unsigned)) => json!(unsigned),
            _ => Json::String(i.to_string()),
        },
        Value::Float(f) => json!(f),
        Value::Bool(b) => Json::Bool(*b),
        Value::Color(c) => Json::String(c.to_string()),
        Value::List(items) => Json::Array(items.iter().map(|i| value_to_json(&i.node)).collect()),
    }
}

// ============================================================================
// fmt
// ============================================================================

/// Options of the `fmt` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct FmtOptions {
    pub check: bool,
    pub diff: bool,
    pub indent: Option<usize>,
    pub tabs: bool,
}

impl FmtOptions {
    /// Formatter settings selected by `--indent` and `--tabs`.
    pub fn config(&self) -> FormatConfig {
        let config = FormatConfig::new().with_tabs(self.tabs);
        match self.indent {
            Some(width) => config.with_indent_width(width),
            None => config,
        }
    }
}

/// Print the formatted file, or report whether it needs formatting.
pub fn format_file(file_path: &str, options: FmtOptions) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let (output, code) = format_output(file_path, &source, options)?;
    print!("{}", output);
    Ok(code)
}

/// Build the stdout text and exit code of `fmt` for one source.
fn format_output(file_path: &str, source: &str, options: FmtOptions) -> CliResult<(String, ExitCode)> {
    let formatted = format_source_with_config(source, options.config())
        .map_err(|errors| CliError::failure(render_syntax_errors(file_path, source, errors).trim_end()))?;

    if options.diff {
        return Ok(match line_diff(source, &formatted) {
            Some(diff) => (format!("--- {}\n{}", file_path, diff), ExitCode::FAILURE),
            None => (String::new(), ExitCode::SUCCESS),
        });
    }

    if options.check {
        if source != formatted {
            return Err(CliError::failure(format!("Would reformat: {}", file_path)));
        }
        return Ok((format!("✓ {} already formatted\n", file_path), ExitCode::SUCCESS));
    }

    Ok((formatted, ExitCode::SUCCESS))
}
