/// Struct and member parsing.
///
/// A member is decided by one token of lookahead after its identifier:
/// - `=` makes it a field
/// - a string or `{` makes it a nested struct
/// - another identifier or `}` makes it a flag
impl<'a> Parser<'a> {
    // ========================================================================
    // Structs
    // ========================================================================

    /// Parse `type_name ["name"] { member* }`.
    fn struct_decl(&mut self) -> Result<Spanned<StructDecl>, SyntaxError> {
        if let TokenKind::TypeKeyword(t) = self.peek().kind {
            return Err(errors::dynamic_declaration(t.keyword(), self.current_span()));
        }
        let type_name = self.identifier_spanned("struct type name")?;

        let name = match &self.peek().kind {
            TokenKind::String(s) => {
                let s = s.clone();
                let span = self.advance().span;
                Some(Spanned::new(s, span))
            }
            _ => None,
        };

        self.expect(&TokenKind::LBrace, "'{' to open the struct body")?;

        let mut members = Vec::new();
        loop {
            if self.check(&TokenKind::RBrace) {
                break;
            }
            if self.is_at_end() {
                return Err(errors::unterminated(
                    &format!("struct '{}'", type_name.node),
                    type_name.span.merge(self.current_span()),
                )
                .with_hint("Add a closing '}'"));
            }
            members.push(self.member()?);
        }
        let close = self.advance().span;

        let span = type_name.span.merge(close);
        Ok(Spanned::new(
            StructDecl {
                type_name,
                name,
                members,
            },
            span,
        ))
    }

    // ========================================================================
    // Members
    // ========================================================================

    fn member(&mut self) -> Result<Spanned<Member>, SyntaxError> {
        match &self.peek().kind {
            TokenKind::TypeKeyword(t) => Err(errors::dynamic_declaration(t.keyword(), self.current_span())),
            TokenKind::Ident(_) => {
                let next = &self.peek_next().kind;
                if matches!(next, TokenKind::Assign) {
                    self.field()
                } else if next.opens_struct_after_ident() {
                    let decl = self.struct_decl()?;
                    Ok(Spanned::new(Member::Struct(decl.node), decl.span))
                } else if next.ends_flag_after_ident() {
                    let name = self.identifier_spanned("flag name")?;
                    let span = name.span;
                    Ok(Spanned::new(Member::Flag(name), span))
                } else {
                    let found = next.to_string();
                    let span = self.peek_next().span;
                    Err(errors::expected_token("'=', a struct body or another member", &found, span))
                }
            }
            other => Err(errors::expected_token(
                "a field, flag or struct",
                &other.to_string(),
                self.current_span(),
            )),
        }
    }

    /// Parse `name = value`.
    fn field(&mut self) -> Result<Spanned<Member>, SyntaxError> {
        let name = self.identifier_spanned("field name")?;
        self.expect(&TokenKind::Assign, "'='")?;
        let value = self.value()?;
        let span = name.span.merge(value.span);
        Ok(Spanned::new(Member::Field { name, value }, span))
    }

    fn identifier_spanned(&mut self, expected: &str) -> Result<Spanned<Ident>, SyntaxError> {
        match self.peek().ident() {
            Some(name) => {
                let name = name.to_string();
                let span = self.advance().span;
                Ok(Spanned::new(name, span))
            }
            None => Err(errors::expected_token(
                expected,
                &self.peek().kind.to_string(),
                self.current_span(),
            )),
        }
    }
}
