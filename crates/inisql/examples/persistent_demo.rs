//! Demonstrates that every successful mutation is written back to the INI file.
//!
//! Run with: cargo run -p inisql --example persistent_demo

use inisql::Interpreter;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let conf_path = "./demo_smb.conf";

    println!("=== inisql Persistent File Demo ===\n");

    // Clean up any previous demo data
    if Path::new(conf_path).exists() {
        std::fs::remove_file(conf_path)?;
        println!("🧹 Cleaned up previous demo file\n");
    }

    // PART 1: Write sections
    println!("📝 PART 1: Writing sections...");
    {
        let sql = Interpreter::open(conf_path)?;

        sql.execute(
            "INSERT INTO global (workgroup=HOME, security=user)",
            &[],
        );
        sql.execute(
            "INSERT INTO global (?=?)",
            &["server string".into(), "Samba Server".into()],
        );
        sql.execute(
            "INSERT INTO homes (comment=%s, browseable=%b)",
            &["Home".into(), false.into()],
        );

        println!("   ✅ Stored 2 sections");
        println!("   📁 Data written to: {}", conf_path);
    }
    println!();

    println!("📄 File contents:\n{}", std::fs::read_to_string(conf_path)?);

    // PART 2: Reopen and verify
    println!("🔓 PART 2: Reopening and querying...");
    {
        let sql = Interpreter::open(conf_path)?;

        let result = sql.execute(
            "SELECT * FROM global WHERE ?=?",
            &["server string".into(), "Samba Server".into()],
        );
        if let Some(rows) = result.rows() {
            for (key, value) in rows {
                println!("   {} = {}", key, value);
            }
        }

        let result = sql.execute("UPDATE homes SET browseable=TRUE WHERE browseable=FALSE", &[]);
        println!("   UPDATE homes applied: {}", result.is_success());

        let result = sql.execute("DROP SECTION homes", &[]);
        println!("   DROP SECTION homes applied: {}", result.is_success());
    }
    println!();

    println!("📄 Final file contents:\n{}", std::fs::read_to_string(conf_path)?);

    std::fs::remove_file(conf_path)?;
    println!("=== Demo Complete ===");
    Ok(())
}
