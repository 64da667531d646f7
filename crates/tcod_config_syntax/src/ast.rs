//! Syntax tree for libtcod-style config files.
//!
//! A document is a flat list of top-level struct instances. Each struct carries its type identifier, an optional
//! quoted instance name, and its members in source order.

use crate::values::Color;

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A parsed config file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub structs: Vec<Spanned<StructDecl>>,
}

impl Document {
    /// All top-level structs with the given type identifier, in source order.
    pub fn structs_of<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a StructDecl> + 'a {
        self.structs
            .iter()
            .map(|s| &s.node)
            .filter(move |s| s.type_name.node == type_name)
    }
}

/// A struct instance: `type_name "name" { members }`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub type_name: Spanned<Ident>,
    pub name: Option<Spanned<String>>,
    pub members: Vec<Spanned<Member>>,
}

impl StructDecl {
    /// Instance name, or `""` when the struct is anonymous.
    pub fn instance_name(&self) -> &str {
        self.name.as_ref().map(|n| n.node.as_str()).unwrap_or("")
    }

    /// Value of the first field named `name`.
    ///
    /// Flags are reported as `Value::Bool(true)`.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.members.iter().find_map(|m| match &m.node {
            Member::Field { name: n, value } if n.node == name => Some(value.node.clone()),
            Member::Flag(n) if n.node == name => Some(Value::Bool(true)),
            _ => None,
        })
    }

    /// Nested structs with the given type identifier, in source order.
    pub fn structs_of<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a StructDecl> + 'a {
        self.members.iter().filter_map(move |m| match &m.node {
            Member::Struct(s) if s.type_name.node == type_name => Some(s),
            _ => None,
        })
    }
}

/// A member of a struct body.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// `name = value`
    Field { name: Spanned<Ident>, value: Spanned<Value> },
    /// A bare identifier, meaning `true`.
    Flag(Spanned<Ident>),
    /// A nested struct instance.
    Struct(StructDecl),
}

/// A literal value on the right-hand side of `=`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Char(char),
    Int(i128),
    Float(f64),
    Bool(bool),
    Color(Color),
    List(Vec<Spanned<Value>>),
}
