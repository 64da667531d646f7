/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `peek_next`, `advance`)
/// - Matching / expecting punctuation
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    /// Advance to the next token and return the token we just consumed.
    ///
    /// Braces adjust `depth` as they are consumed.
    fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        match self.tokens[idx].kind {
            TokenKind::LBrace => self.depth += 1,
            TokenKind::RBrace => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    /// Return `true` if the current token has the same variant as `kind`.
    ///
    /// Payloads of identifiers and literals are ignored.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(kind) == std::mem::discriminant(&self.peek().kind)
    }

    /// If the current token matches `kind`, consume it and return `true`.
    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Span, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(errors::expected_token(
                expected,
                &self.peek().kind.to_string(),
                self.peek().span,
            ))
        }
    }

    /// Skip ahead to the next top-level struct header after an error.
    ///
    /// Always consumes at least one token so recovery makes progress.
    fn synchronize(&mut self) {
        let start = self.pos;
        while !self.is_at_end() {
            if self.depth == 0 && self.pos > start && self.check(&TokenKind::Ident(String::new())) {
                return;
            }
            self.advance();
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }
}
