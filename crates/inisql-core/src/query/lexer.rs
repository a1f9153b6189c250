/// Statement tokenizer
///
/// Splits statement text on runs of whitespace. There is no quoting or
/// escaping: a token never contains whitespace.
use crate::error::{Error, Result};

/// Clause keywords, matched case-insensitively
pub mod keyword {
    pub const SELECT: &str = "SELECT";
    pub const INSERT: &str = "INSERT";
    pub const UPDATE: &str = "UPDATE";
    pub const DELETE: &str = "DELETE";
    pub const DROP: &str = "DROP";
    pub const FROM: &str = "FROM";
    pub const INTO: &str = "INTO";
    pub const SET: &str = "SET";
    pub const WHERE: &str = "WHERE";
    pub const AND: &str = "AND";
    pub const SECTION: &str = "SECTION";
    pub const OPTION: &str = "OPTION";
}

/// Tokenize statement text.
pub fn tokenize(input: &str) -> Result<Vec<&str>> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(Error::syntax("empty query"));
    }
    Ok(tokens)
}

/// Case-insensitive keyword comparison
pub fn is_keyword(token: &str, keyword: &str) -> bool {
    token.eq_ignore_ascii_case(keyword)
}
