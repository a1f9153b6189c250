use inisql::logging::LogConfig;
use inisql::Interpreter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Debug level shows every bound statement and command
    let _guard = LogConfig::debug().init()?;

    println!("=== inisql Logging Demo ===\n");

    let dir = tempfile::tempdir()?;
    let sql = Interpreter::open(dir.path().join("smb.conf"))?;

    println!("\n1. Creating a section...");
    sql.execute("INSERT INTO homes (comment=Home, browseable=no)", &[]);

    println!("\n2. Conditional update...");
    sql.execute("UPDATE homes SET browseable=yes WHERE browseable=no", &[]);

    println!("\n3. A failing statement is logged at warn level...");
    sql.execute("SELECT * FROM printers", &[]);

    println!("\n4. An unknown DROP target...");
    sql.execute("DROP TABLE homes", &[]);

    println!("\n=== Demo Complete ===");
    println!("Check the logs above to see tracing output!");

    Ok(())
}
