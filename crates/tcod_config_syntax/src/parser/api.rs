/// Parse a token stream into a [`Document`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `tcod_config_syntax::lexer`.
///
/// A stream that does not end with `Eof` is parsed as if one followed its last token.
///
/// ## Errors
/// Returns `Err(Vec<SyntaxError>)` if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Document, Vec<SyntaxError>> {
    match tokens.last() {
        None => Ok(Document::default()),
        Some(last) if matches!(last.kind, TokenKind::Eof) => Parser::new(tokens).parse(),
        Some(last) => {
            let end = Span::new(last.span.end, last.span.end);
            let mut terminated = tokens.to_vec();
            terminated.push(Token::new(TokenKind::Eof, end));
            Parser::new(&terminated).parse()
        }
    }
}

/// Lex and parse source text in one step.
///
/// Lexer errors are returned as-is; the parser only runs on a clean token stream.
pub fn parse_source(source: &str) -> Result<Document, Vec<SyntaxError>> {
    let tokens = crate::lexer::lex(source)?;
    parse(&tokens)
}
