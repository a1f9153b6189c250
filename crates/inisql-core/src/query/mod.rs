//! Statement interpreter
//!
//! Placeholder binding, tokenizing, parsing, and execution of the
//! SELECT/INSERT/UPDATE/DELETE/DROP statement language.

/// Parsed statement types
#[allow(missing_docs)]
pub mod ast;
/// Placeholder binder
#[allow(missing_docs)]
pub mod binder;
/// WHERE clause evaluation
pub mod condition;
/// Statement executor
pub mod executor;
/// Statement tokenizer
#[allow(missing_docs)]
pub mod lexer;
/// Statement parser
pub mod parser;
/// Execution result
#[allow(missing_docs)]
pub mod result;
/// Bind parameters
#[allow(missing_docs)]
pub mod value;

// Re-export main types
pub use ast::{Assignment, Columns, Command, Condition, Verb};
pub use binder::{bind, Placeholder};
pub use executor::Executor;
pub use lexer::tokenize;
pub use parser::{parse, Parser};
pub use result::ExecutionResult;
pub use value::{Param, ParamType};

use crate::error::{Error, Result};
use tracing::debug;

/// A statement after binding and parsing, ready to execute
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    /// Statement text after placeholder substitution
    pub text: String,
    /// Parsed command
    pub command: Command,
}

/// Reject a blank statement, then bind `params` into it.
pub fn bind_statement(statement: &str, params: &[Param]) -> Result<String> {
    if statement.trim().is_empty() {
        return Err(Error::Syntax("empty query".to_string()));
    }

    let text = bind(statement, params)?;
    if !params.is_empty() {
        debug!(params = params.len(), bound = %text, "bound parameters");
    }
    Ok(text)
}

/// Bind `params` into `statement` and parse the result.
///
/// A blank statement is rejected before binding is attempted.
pub fn prepare(statement: &str, params: &[Param]) -> Result<Prepared> {
    let text = bind_statement(statement, params)?;

    let command = parse(&text)?;
    Ok(Prepared { text, command })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_prepare_binds_before_parsing() {
        let prepared = prepare(
            "SELECT * FROM ? WHERE ?=?",
            &["global".into(), "server string".into(), "Samba Server".into()],
        )
        .unwrap();
        assert_eq!(prepared.text, "SELECT * FROM global WHERE server string=Samba Server");
        assert_eq!(
            prepared.command,
            Command::Select {
                columns: Columns::All,
                section: "global".to_string(),
                conditions: vec![Condition::new("server string", "Samba Server")],
            }
        );
    }

    #[test]
    fn test_prepare_empty_statement_with_params() {
        let err = prepare("  ", &[1.into()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_prepare_bound_verb_is_dispatched() {
        let prepared = prepare("? SECTION s", &["drop".into()]).unwrap();
        assert_eq!(
            prepared.command,
            Command::DropSection {
                section: "s".to_string()
            }
        );
    }
}
