/// Value parsing: literals, `true`/`false`, concatenated strings and lists.
impl<'a> Parser<'a> {
    fn value(&mut self) -> Result<Spanned<Value>, SyntaxError> {
        let start = self.current_span();
        let value = match &self.peek().kind {
            TokenKind::String(_) => return Ok(self.string_value()),
            TokenKind::Char(c) => Value::Char(*c),
            TokenKind::Int(i) => Value::Int(*i),
            TokenKind::Float(f) => Value::Float(*f),
            TokenKind::Color(c) => Value::Color(*c),
            TokenKind::Ident(s) if s == "true" => Value::Bool(true),
            TokenKind::Ident(s) if s == "false" => Value::Bool(false),
            TokenKind::LBracket => return self.list_value(),
            TokenKind::Ident(s) => {
                return Err(errors::expected_token("a value", &self.peek().kind.to_string(), start)
                    .with_hint(format!("Strings must be quoted: \"{}\"", s)));
            }
            other => return Err(errors::expected_token("a value", &other.to_string(), start)),
        };
        self.advance();
        Ok(Spanned::new(value, start))
    }

    /// Adjacent string literals concatenate into one value.
    fn string_value(&mut self) -> Spanned<Value> {
        let mut text = String::new();
        let mut span = self.current_span();
        while let TokenKind::String(s) = &self.peek().kind {
            text.push_str(s);
            span = span.merge(self.advance().span);
        }
        Spanned::new(Value::String(text), span)
    }

    /// Parse `[v, v, ...]`, allowing a trailing comma.
    fn list_value(&mut self) -> Result<Spanned<Value>, SyntaxError> {
        let open = self.expect(&TokenKind::LBracket, "'['")?;
        let mut items = Vec::new();

        loop {
            if self.check(&TokenKind::RBracket) {
                break;
            }
            items.push(self.value()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        let close = self.expect(&TokenKind::RBracket, "',' or ']'")?;
        Ok(Spanned::new(Value::List(items), open.merge(close)))
    }
}
