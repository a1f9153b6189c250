/// WHERE clause evaluation
///
/// A section is a flat key/value table with no row concept, so conditions are
/// tested against the section as a whole: either every condition holds for
/// the section and all candidate entries survive, or none do.
use super::ast::Condition;
use super::lexer::{is_keyword, keyword};
use crate::error::{Error, Result};
use crate::store::Section;
use indexmap::IndexMap;

/// Split `key=value` on the first `=`, trimming both sides.
pub fn split_pair(clause: &str, what: &str) -> Result<(String, String)> {
    let (key, value) = clause
        .split_once('=')
        .ok_or_else(|| Error::syntax(format!("expected key=value in {}, got '{}'", what, clause)))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::syntax(format!("empty key in {}", what)));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Parse the tokens following `WHERE` into an AND-chained condition list.
///
/// Tokens between `AND`s are rejoined with single spaces, so `k = v` and
/// values holding single spaces are accepted.
pub fn parse_conditions(tokens: &[&str]) -> Result<Vec<Condition>> {
    if tokens.is_empty() {
        return Err(Error::syntax("WHERE requires at least one condition"));
    }

    tokens
        .split(|token| is_keyword(token, keyword::AND))
        .map(|group| {
            if group.is_empty() {
                return Err(Error::syntax("dangling AND in WHERE clause"));
            }
            let (key, value) = split_pair(&group.join(" "), "WHERE clause")?;
            Ok(Condition { key, value })
        })
        .collect()
}

/// Does `section` satisfy every condition?
pub fn matches(section: &Section, conditions: &[Condition]) -> bool {
    conditions
        .iter()
        .all(|cond| section.get(&cond.key) == Some(cond.value.as_str()))
}

/// Keep the entries of `candidates` for which all conditions hold, looking
/// condition keys up in the unfiltered `section`.
pub fn apply_conditions(
    candidates: IndexMap<String, String>,
    section: &Section,
    conditions: &[Condition],
) -> IndexMap<String, String> {
    candidates
        .into_iter()
        .filter(|_| matches(section, conditions))
        .collect()
}
