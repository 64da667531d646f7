#![no_main]

use libfuzzer_sys::fuzz_target;
use tcod_config::format::format_source;
use tcod_config::syntax::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            if parser::parse(&tokens).is_ok() {
                // Anything that parses must format, and formatting must be stable
                let formatted = format_source(s).expect("parsed source failed to format");
                let again = format_source(&formatted).expect("formatted source failed to parse");
                assert_eq!(formatted, again);
            }
        }
    }
});
