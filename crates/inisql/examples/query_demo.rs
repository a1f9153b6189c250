/// Statement Demo
///
/// Runs every statement form against an in-memory store.
use inisql::{ExecutionResult, Interpreter};

fn show(label: &str, result: &ExecutionResult) {
    match result {
        ExecutionResult::Rows(rows) => {
            println!("{}: {} row(s)", label, rows.len());
            for (key, value) in rows {
                println!("   {} = {}", key, value);
            }
        }
        ExecutionResult::Applied => println!("{}: applied", label),
        ExecutionResult::Unmatched => println!("{}: nothing matched", label),
        ExecutionResult::Failed(err) => println!("{}: failed: {}", label, err),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== inisql Statement Demo ===\n");

    let sql = Interpreter::in_memory()?;

    show(
        "INSERT",
        &sql.execute(
            "INSERT INTO global (workgroup=HOME, security=user, log=%i)",
            &[3.into()],
        ),
    );
    show("SELECT *", &sql.execute("SELECT * FROM global", &[]));
    show(
        "SELECT keys",
        &sql.execute("SELECT workgroup,log FROM global", &[]),
    );
    show(
        "SELECT WHERE (match)",
        &sql.execute("SELECT * FROM global WHERE security=user AND log=3", &[]),
    );
    show(
        "SELECT WHERE (miss)",
        &sql.execute("SELECT * FROM global WHERE security=share", &[]),
    );

    show(
        "UPDATE (miss)",
        &sql.execute("UPDATE global SET log=1 WHERE log=2", &[]),
    );
    show(
        "UPDATE (match)",
        &sql.execute("UPDATE global SET log=1 WHERE log=3", &[]),
    );
    show(
        "DELETE",
        &sql.execute("DELETE FROM global WHERE ?=?", &["log".into(), "1".into()]),
    );

    show("SELECT missing key", &sql.execute("SELECT a,b FROM global", &[]));
    show("DROP OPTION", &sql.execute("DROP OPTION security FROM global", &[]));
    show("DROP SECTION", &sql.execute("DROP SECTION global", &[]));
    show("SELECT dropped", &sql.execute("SELECT * FROM global", &[]));
    show("Type mismatch", &sql.execute("INSERT INTO s (k=%i)", &["x".into()]));

    if let Some(query) = sql.last_query() {
        println!("\nLast dispatched statement: {}", query);
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
