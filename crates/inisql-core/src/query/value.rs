/// Bind parameters
///
/// Values a caller passes alongside a statement to fill its placeholders.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single bind parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Param {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Runtime type of a [`Param`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Str,
    Int,
    Float,
    Bool,
    Null,
}

impl Param {
    pub fn kind(&self) -> ParamType {
        match self {
            Param::Str(_) => ParamType::Str,
            Param::Int(_) => ParamType::Int,
            Param::Float(_) => ParamType::Float,
            Param::Bool(_) => ParamType::Bool,
            Param::Null => ParamType::Null,
        }
    }

    /// Text spliced into the statement in place of a placeholder
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Str(s) => write!(f, "{}", s),
            Param::Int(i) => write!(f, "{}", i),
            // Debug keeps the fractional part: 3.0 renders as "3.0", not "3"
            Param::Float(fl) => write!(f, "{:?}", fl),
            Param::Bool(true) => write!(f, "TRUE"),
            Param::Bool(false) => write!(f, "FALSE"),
            Param::Null => write!(f, "NULL"),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Str => write!(f, "string"),
            ParamType::Int => write!(f, "integer"),
            ParamType::Float => write!(f, "float"),
            ParamType::Bool => write!(f, "boolean"),
            ParamType::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Str(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Str(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(value.into())
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Int(value.into())
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(Param::from("abc").render(), "abc");
        assert_eq!(Param::from(42).render(), "42");
        assert_eq!(Param::from(3.0).render(), "3.0");
        assert_eq!(Param::from(0.25).render(), "0.25");
        assert_eq!(Param::from(true).render(), "TRUE");
        assert_eq!(Param::from(false).render(), "FALSE");
        assert_eq!(Param::from(None::<i64>).render(), "NULL");
    }

    #[test]
    fn test_kind() {
        assert_eq!(Param::from(Some(7i64)).kind(), ParamType::Int);
        assert_eq!(Param::Null.kind(), ParamType::Null);
        assert_eq!(ParamType::Float.to_string(), "float");
    }
}
