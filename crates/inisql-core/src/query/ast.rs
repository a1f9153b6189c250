/// Parsed statement types
///
/// One variant per supported statement form. Every field is already
/// validated, so handlers never look at raw tokens.
use crate::store::KeyCase;
use std::fmt;

/// A parsed statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SELECT <cols> FROM <section> [WHERE <cond> [AND <cond>]...]`
    Select {
        columns: Columns,
        section: String,
        conditions: Vec<Condition>,
    },
    /// `INSERT INTO <section> (<key>=<value>[, ...])`
    Insert {
        section: String,
        assignments: Vec<Assignment>,
    },
    /// `UPDATE <section> SET <key>=<value> WHERE <key>=<value>`
    Update {
        section: String,
        assignment: Assignment,
        condition: Condition,
    },
    /// `DELETE FROM <section> WHERE <key>=<value>`
    Delete { section: String, condition: Condition },
    /// `DROP SECTION <section>`
    DropSection { section: String },
    /// `DROP OPTION <key> FROM <section>`
    DropOption { option: String, section: String },
    /// `DROP <anything else> ...`, executed as a no-op failure
    DropUnknown { target: String },
}

impl Command {
    /// Statement verb
    pub fn verb(&self) -> Verb {
        match self {
            Command::Select { .. } => Verb::Select,
            Command::Insert { .. } => Verb::Insert,
            Command::Update { .. } => Verb::Update,
            Command::Delete { .. } => Verb::Delete,
            Command::DropSection { .. } | Command::DropOption { .. } | Command::DropUnknown { .. } => {
                Verb::Drop
            }
        }
    }

    /// Whether a successful run changes the store
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::Select { .. } | Command::DropUnknown { .. })
    }

    /// Normalize every option key the command names. Section names are untouched.
    pub fn normalize_keys(mut self, key_case: KeyCase) -> Self {
        if key_case == KeyCase::Preserve {
            return self;
        }
        let fold = |key: &mut String| {
            let folded = key_case.normalize(key).into_owned();
            *key = folded;
        };

        match &mut self {
            Command::Select {
                columns,
                conditions,
                ..
            } => {
                if let Columns::Keys(keys) = columns {
                    keys.iter_mut().for_each(fold);
                }
                conditions.iter_mut().for_each(|c| fold(&mut c.key));
            }
            Command::Insert { assignments, .. } => {
                assignments.iter_mut().for_each(|a| fold(&mut a.key));
            }
            Command::Update {
                assignment,
                condition,
                ..
            } => {
                fold(&mut assignment.key);
                fold(&mut condition.key);
            }
            Command::Delete { condition, .. } => fold(&mut condition.key),
            Command::DropOption { option, .. } => fold(option),
            Command::DropSection { .. } | Command::DropUnknown { .. } => {}
        }
        self
    }
}

/// Supported statement verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Select,
    Insert,
    Update,
    Delete,
    Drop,
}

impl Verb {
    /// Match an upper-cased verb token
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "SELECT" => Some(Verb::Select),
            "INSERT" => Some(Verb::Insert),
            "UPDATE" => Some(Verb::Update),
            "DELETE" => Some(Verb::Delete),
            "DROP" => Some(Verb::Drop),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Select => write!(f, "SELECT"),
            Verb::Insert => write!(f, "INSERT"),
            Verb::Update => write!(f, "UPDATE"),
            Verb::Delete => write!(f, "DELETE"),
            Verb::Drop => write!(f, "DROP"),
        }
    }
}

/// SELECT column list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    /// `*`
    All,
    /// `k1,k2,...` in request order
    Keys(Vec<String>),
}

/// `key=value` equality test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub key: String,
    pub value: String,
}

impl Condition {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// `key=value` write, from a SET clause or an INSERT list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

impl Assignment {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keys_folds_options_only() {
        let command = Command::Update {
            section: "Global".to_string(),
            assignment: Assignment::new("WorkGroup", "HOME"),
            condition: Condition::new("Security", "USER"),
        };
        assert_eq!(
            command.clone().normalize_keys(KeyCase::Lower),
            Command::Update {
                section: "Global".to_string(),
                assignment: Assignment::new("workgroup", "HOME"),
                condition: Condition::new("security", "USER"),
            }
        );
        assert_eq!(command.clone().normalize_keys(KeyCase::Preserve), command);

        let select = Command::Select {
            columns: Columns::Keys(vec!["A".to_string(), "b".to_string()]),
            section: "S".to_string(),
            conditions: vec![Condition::new("C", "V")],
        };
        match select.normalize_keys(KeyCase::Lower) {
            Command::Select {
                columns,
                section,
                conditions,
            } => {
                assert_eq!(columns, Columns::Keys(vec!["a".to_string(), "b".to_string()]));
                assert_eq!(section, "S");
                assert_eq!(conditions, vec![Condition::new("c", "V")]);
            }
            other => panic!("unexpected: {:?}", other),
        }

        let drop_option = Command::DropOption {
            option: "Path".to_string(),
            section: "Homes".to_string(),
        };
        assert_eq!(
            drop_option.normalize_keys(KeyCase::Lower),
            Command::DropOption {
                option: "path".to_string(),
                section: "Homes".to_string(),
            }
        );
    }
}
