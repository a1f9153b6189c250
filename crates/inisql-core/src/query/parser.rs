/// Statement parser
///
/// Dispatches on the verb token and runs a positional parser per verb,
/// producing a [`Command`].
use super::ast::*;
use super::condition::{parse_conditions, split_pair};
use super::lexer::{is_keyword, keyword, tokenize};
use crate::error::{Error, Result};

/// Parser over a tokenized statement
pub struct Parser<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> Parser<'a> {
    /// Tokenize `input` and prepare to parse it
    pub fn new(input: &'a str) -> Result<Self> {
        Ok(Self {
            tokens: tokenize(input)?,
        })
    }

    /// Recognize the verb token
    pub fn verb(&self) -> Result<Verb> {
        let word = self.tokens[0].to_uppercase();
        Verb::from_keyword(&word).ok_or(Error::UnsupportedOperation(word))
    }

    /// Parse the statement
    pub fn parse(&self) -> Result<Command> {
        match self.verb()? {
            Verb::Select => self.parse_select(),
            Verb::Insert => self.parse_insert(),
            Verb::Update => self.parse_update(),
            Verb::Delete => self.parse_delete(),
            Verb::Drop => self.parse_drop(),
        }
    }

    fn token(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    fn expect_keyword(&self, index: usize, kw: &str, verb: Verb) -> Result<()> {
        match self.token(index) {
            Some(token) if is_keyword(token, kw) => Ok(()),
            Some(token) => Err(Error::syntax(format!(
                "Invalid {} syntax: expected {}, found '{}'",
                verb, kw, token
            ))),
            None => Err(Error::syntax(format!(
                "Invalid {} syntax: expected {}, found end of statement",
                verb, kw
            ))),
        }
    }

    fn expect_name(&self, index: usize, what: &str, verb: Verb) -> Result<String> {
        self.token(index).map(str::to_string).ok_or_else(|| {
            Error::syntax(format!("Invalid {} syntax: missing {}", verb, what))
        })
    }

    /// First WHERE at or after `from`
    fn where_position(&self, from: usize) -> Option<usize> {
        self.tokens
            .iter()
            .skip(from)
            .position(|token| is_keyword(token, keyword::WHERE))
            .map(|pos| pos + from)
    }

    /// WHERE clause of UPDATE/DELETE: exactly one condition
    fn single_condition(&self, where_pos: usize, verb: Verb) -> Result<Condition> {
        let mut conditions = parse_conditions(&self.tokens[where_pos + 1..])?;
        if conditions.len() != 1 {
            return Err(Error::syntax(format!(
                "Invalid {} syntax: only a single WHERE condition is supported",
                verb
            )));
        }
        Ok(conditions.remove(0))
    }

    fn parse_select(&self) -> Result<Command> {
        let verb = Verb::Select;
        let cols = self.expect_name(1, "column list", verb)?;
        self.expect_keyword(2, keyword::FROM, verb)?;
        let section = self.expect_name(3, "section", verb)?;

        let columns = if cols == "*" {
            Columns::All
        } else {
            let keys: Vec<String> = cols.split(',').map(|k| k.trim().to_string()).collect();
            if keys.iter().any(String::is_empty) {
                return Err(Error::syntax("Invalid SELECT syntax: empty column name"));
            }
            Columns::Keys(keys)
        };

        let conditions = if self.tokens.len() > 4 {
            self.expect_keyword(4, keyword::WHERE, verb)?;
            parse_conditions(&self.tokens[5..])?
        } else {
            Vec::new()
        };

        Ok(Command::Select {
            columns,
            section,
            conditions,
        })
    }

    fn parse_insert(&self) -> Result<Command> {
        let verb = Verb::Insert;
        self.expect_keyword(1, keyword::INTO, verb)?;
        let section = self.expect_name(2, "section", verb)?;
        if self.tokens.len() < 4 {
            return Err(Error::syntax("Invalid INSERT syntax: missing value list"));
        }

        let list = self.tokens[3..].join(" ");
        let inner = list
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| Error::syntax("Invalid INSERT syntax: value list must be parenthesized"))?;

        let assignments = inner
            .split(',')
            .map(|pair| split_pair(pair.trim(), "INSERT list").map(|(k, v)| Assignment::new(k, v)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Command::Insert {
            section,
            assignments,
        })
    }

    fn parse_update(&self) -> Result<Command> {
        let verb = Verb::Update;
        let section = self.expect_name(1, "section", verb)?;
        self.expect_keyword(2, keyword::SET, verb)?;
        let where_pos = self
            .where_position(3)
            .ok_or_else(|| Error::syntax("Invalid UPDATE syntax: missing WHERE"))?;

        let set_clause = self.tokens[3..where_pos].join(" ");
        if set_clause.is_empty() {
            return Err(Error::syntax("Invalid UPDATE syntax: empty SET clause"));
        }
        let (key, value) = split_pair(&set_clause, "SET clause")?;
        let condition = self.single_condition(where_pos, verb)?;

        Ok(Command::Update {
            section,
            assignment: Assignment::new(key, value),
            condition,
        })
    }

    fn parse_delete(&self) -> Result<Command> {
        let verb = Verb::Delete;
        self.expect_keyword(1, keyword::FROM, verb)?;
        let section = self.expect_name(2, "section", verb)?;
        self.expect_keyword(3, keyword::WHERE, verb)?;
        let condition = self.single_condition(3, verb)?;

        Ok(Command::Delete { section, condition })
    }

    fn parse_drop(&self) -> Result<Command> {
        let verb = Verb::Drop;
        let target = self.expect_name(1, "target", verb)?;

        if is_keyword(&target, keyword::SECTION) {
            let section = self.expect_name(2, "section", verb)?;
            if self.tokens.len() > 3 {
                return Err(Error::syntax("Invalid DROP syntax: trailing tokens after section"));
            }
            Ok(Command::DropSection { section })
        } else if is_keyword(&target, keyword::OPTION) {
            let option = self.expect_name(2, "option", verb)?;
            self.expect_keyword(3, keyword::FROM, verb)?;
            let section = self.expect_name(4, "section", verb)?;
            if self.tokens.len() > 5 {
                return Err(Error::syntax("Invalid DROP syntax: trailing tokens after section"));
            }
            Ok(Command::DropOption { option, section })
        } else {
            Ok(Command::DropUnknown { target })
        }
    }
}

/// Tokenize and parse a (bound) statement.
pub fn parse(statement: &str) -> Result<Command> {
    Parser::new(statement)?.parse()
}
