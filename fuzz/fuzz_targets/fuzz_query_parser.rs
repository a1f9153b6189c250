#![no_main]

use inisql_core::query::parser::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string (ignore invalid UTF-8)
    if let Ok(statement) = std::str::from_utf8(data) {
        // Limit statement length to prevent timeout
        if statement.len() > 10_000 {
            return;
        }

        // Try to parse the statement - should never panic
        if let Ok(parser) = Parser::new(statement) {
            let _ = parser.parse();
        }
    }
});
