/// Placeholder binder
///
/// Rewrites typed placeholders in raw statement text with rendered parameter
/// values, before the statement is tokenized.
use super::value::{Param, ParamType};
use crate::error::{Error, Result};

/// A placeholder recognized in statement text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `%s`
    Str,
    /// `%i`
    Int,
    /// `%f`
    Float,
    /// `%b`
    Bool,
    /// `?`
    Any,
}

impl Placeholder {
    /// Type a parameter must have to fill this placeholder, `None` for `?`
    pub fn required_type(self) -> Option<ParamType> {
        match self {
            Placeholder::Str => Some(ParamType::Str),
            Placeholder::Int => Some(ParamType::Int),
            Placeholder::Float => Some(ParamType::Float),
            Placeholder::Bool => Some(ParamType::Bool),
            Placeholder::Any => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::Str => "%s",
            Placeholder::Int => "%i",
            Placeholder::Float => "%f",
            Placeholder::Bool => "%b",
            Placeholder::Any => "?",
        }
    }
}

/// Binder state
pub struct Binder<'a> {
    input: Vec<char>,
    position: usize,
    params: &'a [Param],
}

impl<'a> Binder<'a> {
    pub fn new(input: &str, params: &'a [Param]) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            params,
        }
    }

    /// Replace every placeholder left to right, one parameter each.
    ///
    /// All placeholder kinds share a single cursor over the parameter list.
    pub fn bind(&mut self) -> Result<String> {
        let mut output = String::with_capacity(self.input.len());
        let mut consumed = 0;
        let mut found = 0;

        while self.position < self.input.len() {
            match self.read_placeholder() {
                Some(placeholder) => {
                    found += 1;
                    if let Some(param) = self.params.get(consumed) {
                        check_type(consumed, placeholder, param)?;
                        output.push_str(&param.render());
                        consumed += 1;
                    }
                }
                None => {
                    output.push(self.current_char());
                    self.advance();
                }
            }
        }

        if found != self.params.len() {
            return Err(Error::Arity {
                placeholders: found,
                parameters: self.params.len(),
            });
        }

        Ok(output)
    }

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn read_placeholder(&mut self) -> Option<Placeholder> {
        let placeholder = match (self.current_char(), self.peek_char()) {
            ('?', _) => {
                self.advance();
                return Some(Placeholder::Any);
            }
            ('%', Some('s')) => Placeholder::Str,
            ('%', Some('i')) => Placeholder::Int,
            ('%', Some('f')) => Placeholder::Float,
            ('%', Some('b')) => Placeholder::Bool,
            _ => return None,
        };
        self.position += 2;
        Some(placeholder)
    }
}

fn check_type(position: usize, placeholder: Placeholder, param: &Param) -> Result<()> {
    match placeholder.required_type() {
        Some(expected) if expected != param.kind() => Err(Error::TypeMismatch {
            position,
            placeholder: placeholder.as_str().to_string(),
            expected: expected.to_string(),
            found: param.kind().to_string(),
        }),
        _ => Ok(()),
    }
}

/// Bind `params` into `statement`.
///
/// An empty parameter list leaves the statement untouched, placeholders included.
pub fn bind(statement: &str, params: &[Param]) -> Result<String> {
    if params.is_empty() {
        return Ok(statement.to_string());
    }
    Binder::new(statement, params).bind()
}
