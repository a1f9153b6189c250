#![no_main]

use inisql_storage::{format, IniOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if text.len() > 64 * 1024 {
            return;
        }

        let options = IniOptions::default();
        if let Ok(store) = format::parse(text, &options) {
            // Anything the writer accepts must read back unchanged
            if format::validate(&store, &options).is_ok() {
                let rendered = format::render(&store, &options);
                let reparsed = format::parse(&rendered, &options);
                assert_eq!(reparsed.ok(), Some(store));
            }
        }
    }
});
