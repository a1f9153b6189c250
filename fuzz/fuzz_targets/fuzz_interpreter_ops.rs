#![no_main]

use arbitrary::Arbitrary;
use inisql::{Interpreter, Param};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Select { section: String, key: String, value: String },
    Insert { section: String, key: String, value: String },
    Update { section: String, key: String, old: String, new: String },
    Delete { section: String, key: String, value: String },
    DropSection { section: String },
    DropOption { section: String, key: String },
    Raw { statement: String },
}

fuzz_target!(|ops: Vec<Op>| {
    // Create in-memory interpreter for fast fuzzing
    let Ok(sql) = Interpreter::in_memory() else {
        return;
    };

    for op in ops.iter().take(100) {
        // Limit operations to prevent timeout
        let _ = match op {
            Op::Select { section, key, value } => sql.execute(
                "SELECT * FROM ? WHERE ?=?",
                &[section.as_str().into(), key.as_str().into(), value.as_str().into()],
            ),
            Op::Insert { section, key, value } => sql.execute(
                "INSERT INTO ? (?=?)",
                &[section.as_str().into(), key.as_str().into(), value.as_str().into()],
            ),
            Op::Update { section, key, old, new } => sql.execute(
                "UPDATE ? SET ?=? WHERE ?=?",
                &[
                    section.as_str().into(),
                    key.as_str().into(),
                    new.as_str().into(),
                    key.as_str().into(),
                    old.as_str().into(),
                ],
            ),
            Op::Delete { section, key, value } => sql.execute(
                "DELETE FROM ? WHERE ?=?",
                &[section.as_str().into(), key.as_str().into(), value.as_str().into()],
            ),
            Op::DropSection { section } => {
                sql.execute("DROP SECTION ?", &[Param::from(section.as_str())])
            }
            Op::DropOption { section, key } => sql.execute(
                "DROP OPTION ? FROM ?",
                &[key.as_str().into(), section.as_str().into()],
            ),
            Op::Raw { statement } => sql.execute(statement, &[]),
        };
    }
});
