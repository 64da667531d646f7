#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover each member form, value parsing, and the parser's error recovery
/// (one error per broken struct, no cascades).
mod tests {
    use super::*;
    use crate::values::Color;

    fn parse_str(source: &str) -> Result<Document, Vec<SyntaxError>> {
        parse_source(source)
    }

    fn only_struct(source: &str) -> StructDecl {
        let mut document = parse_str(source).unwrap();
        assert_eq!(document.structs.len(), 1);
        document.structs.remove(0).node
    }

    #[test]
    fn test_parse_empty_document() {
        let document = parse_str("// nothing here\n").unwrap();
        assert!(document.structs.is_empty());
    }

    #[test]
    fn test_parse_tokens_without_eof() {
        let tokens = vec![Token::new(TokenKind::Ident("a".into()), Span::new(0, 1))];
        let errors = parse(&tokens).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span, Span::new(1, 1));

        let mut tokens = crate::lexer::lex("s { x = 1 }").unwrap();
        tokens.pop();
        let document = parse(&tokens).unwrap();
        assert_eq!(document.structs.len(), 1);
    }

    #[test]
    fn test_document_structs_of() {
        let document = parse_str(r#"item "a" { } monster "m" { } item "b" { }"#).unwrap();
        let names: Vec<&str> = document.structs_of("item").map(|s| s.instance_name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(document.structs_of("monster").count(), 1);
        assert_eq!(document.structs_of("door").count(), 0);
    }

    #[test]
    fn test_parse_named_struct() {
        let decl = only_struct(r#"item_type "sword" { damage = 10 }"#);
        assert_eq!(decl.type_name.node, "item_type");
        assert_eq!(decl.instance_name(), "sword");
        assert_eq!(decl.field("damage"), Some(Value::Int(10)));
    }

    #[test]
    fn test_parse_anonymous_struct() {
        let decl = only_struct("settings { volume = 0.5 }");
        assert!(decl.name.is_none());
        assert_eq!(decl.instance_name(), "");
        assert_eq!(decl.field("volume"), Some(Value::Float(0.5)));
    }

    #[test]
    fn test_parse_flags() {
        let decl = only_struct("monster { undead flying hp = 3 regenerates }");
        let flags: Vec<&str> = decl
            .members
            .iter()
            .filter_map(|m| match &m.node {
                Member::Flag(name) => Some(name.node.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(flags, vec!["undead", "flying", "regenerates"]);
    }

    #[test]
    fn test_parse_nested_structs_keep_source_order() {
        let decl = only_struct(
            r#"
outer {
    inner1 "a" { x = 1 }
    inner2 { y = 2 }
    inner1 "b" { x = 3 }
}
"#,
        );
        let names: Vec<&str> = decl.structs_of("inner1").map(|s| s.instance_name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(decl.structs_of("inner2").count(), 1);
        assert!(matches!(decl.members[1].node, Member::Struct(ref s) if s.type_name.node == "inner2"));
    }

    #[test]
    fn test_parse_all_value_kinds() {
        let decl = only_struct(
            r#"s {
                text = "a" "b"
                ch = 'x'
                int = -4
                hex = 0x10
                float = 2.5
                on = true
                off = false
                col = #102030
                list = [1, 2, 3,]
                empty = []
            }"#,
        );
        assert_eq!(decl.field("text"), Some(Value::String("ab".into())));
        assert_eq!(decl.field("ch"), Some(Value::Char('x')));
        assert_eq!(decl.field("int"), Some(Value::Int(-4)));
        assert_eq!(decl.field("hex"), Some(Value::Int(16)));
        assert_eq!(decl.field("float"), Some(Value::Float(2.5)));
        assert_eq!(decl.field("on"), Some(Value::Bool(true)));
        assert_eq!(decl.field("off"), Some(Value::Bool(false)));
        assert_eq!(decl.field("col"), Some(Value::Color(Color::new(0x10, 0x20, 0x30))));
        match decl.field("list") {
            Some(Value::List(items)) => {
                let ints: Vec<Value> = items.into_iter().map(|i| i.node).collect();
                assert_eq!(ints, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
            }
            other => panic!("Expected list, got {:?}", other),
        }
        assert_eq!(decl.field("empty"), Some(Value::List(vec![])));
    }

    #[test]
    fn test_concatenated_string_span_covers_all_parts() {
        let source = "s { t = \"ab\"\n  \"cd\" }";
        let decl = only_struct(source);
        match &decl.members[0].node {
            Member::Field { value, .. } => {
                assert_eq!(&source[value.span.start..value.span.end], "\"ab\"\n  \"cd\"");
            }
            other => panic!("Expected field, got {:?}", other),
        }
    }

    #[test]
    fn test_unquoted_string_value_has_hint() {
        let errors = parse_str("s { name = bob }").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Expected a value"));
        assert!(errors[0].hints[0].contains("\"bob\""));
    }

    #[test]
    fn test_dynamic_declaration_rejected() {
        let errors = parse_str("s { int_t count = 3 }").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Dynamic declarations are not supported"));

        let errors = parse_str("struct_t item { }").unwrap_err();
        assert!(errors[0].message.contains("struct_t"));
    }

    #[test]
    fn test_unterminated_struct() {
        let errors = parse_str("s { a = 1").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Unterminated struct 's'"));
    }

    #[test]
    fn test_missing_value_after_assign() {
        let errors = parse_str("s { a = }").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("found '}'"));
    }

    #[test]
    fn test_recovery_reports_one_error_per_broken_struct() {
        let source = r#"
a { x = }
b { y = 2 }
c { z = [1 2] }
d { w = 4 }
"#;
        let errors = parse_str(source).unwrap_err();
        assert_eq!(errors.len(), 2, "got: {:?}", errors);
        assert!(errors[1].message.contains("',' or ']'"));
    }

    #[test]
    fn test_stray_top_level_tokens() {
        let errors = parse_str("= 3 ok { }").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("struct type name"));
    }

    #[test]
    fn test_struct_span_covers_header_to_brace() {
        let source = "  item \"x\" { }  ";
        let document = parse_str(source).unwrap();
        let span = document.structs[0].span;
        assert_eq!(&source[span.start..span.end], "item \"x\" { }");
    }
}
