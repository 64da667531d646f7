/// Parser core type and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by skipping to the next top-level
///   struct, so one run can report problems in several structs.
/// - `depth` tracks brace nesting of every consumed token; recovery relies on it.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `tcod_config_syntax::lexer`; it must end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Document`].
    ///
    /// ## Errors
    /// Returns a list of [`SyntaxError`]s if parsing fails.
    pub fn parse(mut self) -> Result<Document, Vec<SyntaxError>> {
        let mut structs = Vec::new();

        while !self.is_at_end() {
            match self.struct_decl() {
                Ok(decl) => structs.push(decl),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(Document { structs })
        } else {
            Err(self.errors)
        }
    }
}
