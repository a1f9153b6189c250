/// Resource limits for statements and their parameters
///
/// Input validation applied before a statement is bound or parsed, to keep a
/// hostile caller from exhausting memory or writing names the backing file
/// cannot hold.
use inisql_core::error::{Error, Result};
use inisql_core::{Command, Param};

/// Limits enforced by [`crate::Interpreter::execute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum statement length in bytes, before binding
    pub max_statement_len: usize,
    /// Maximum number of bind parameters
    pub max_parameters: usize,
    /// Maximum length of a section name or key
    pub max_identifier_len: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_statement_len: 1024 * 1024, // 1 MB
            max_parameters: 1024,
            max_identifier_len: 4096,
        }
    }
}

impl ResourceLimits {
    /// Validates a raw statement and its parameter list
    ///
    /// # Errors
    ///
    /// Returns Error::InvalidInput if the statement or parameter list is oversized
    #[inline]
    pub fn validate_statement(&self, statement: &str, params: &[Param]) -> Result<()> {
        if statement.len() > self.max_statement_len {
            return Err(Error::InvalidInput(format!(
                "Statement length {} exceeds maximum {}",
                statement.len(),
                self.max_statement_len
            )));
        }

        if params.len() > self.max_parameters {
            return Err(Error::InvalidInput(format!(
                "Parameter count {} exceeds maximum {}",
                params.len(),
                self.max_parameters
            )));
        }

        Ok(())
    }

    /// Validates the section names and keys a parsed command writes
    ///
    /// # Errors
    ///
    /// Returns Error::InvalidInput for oversized names or names holding NUL bytes
    pub fn validate_command(&self, command: &Command) -> Result<()> {
        match command {
            Command::Insert {
                section,
                assignments,
            } => {
                self.validate_identifier(section)?;
                for assignment in assignments {
                    self.validate_identifier(&assignment.key)?;
                }
            }
            Command::Update {
                section,
                assignment,
                ..
            } => {
                self.validate_identifier(section)?;
                self.validate_identifier(&assignment.key)?;
            }
            _ => {}
        }
        Ok(())
    }

    #[inline]
    fn validate_identifier(&self, name: &str) -> Result<()> {
        if name.len() > self.max_identifier_len {
            return Err(Error::InvalidInput(format!(
                "Identifier length {} exceeds maximum {}",
                name.len(),
                self.max_identifier_len
            )));
        }

        if name.contains('\0') {
            return Err(Error::InvalidInput(
                "Identifier cannot contain null bytes".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inisql_core::{prepare, ErrorKind};

    #[test]
    fn test_validate_statement() {
        let limits = ResourceLimits::default();

        // Valid
        assert!(limits.validate_statement("SELECT * FROM s", &[]).is_ok());

        // Too long
        let long = "a".repeat(2 * 1024 * 1024);
        assert!(limits.validate_statement(&long, &[]).is_err());

        // Too many parameters
        let params = vec![Param::Null; 1025];
        let err = limits.validate_statement("?", &params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validate_command() {
        let limits = ResourceLimits {
            max_identifier_len: 4,
            ..Default::default()
        };

        let ok = prepare("INSERT INTO s (abcd=1)", &[]).unwrap().command;
        assert!(limits.validate_command(&ok).is_ok());

        let long = prepare("INSERT INTO s (abcde=1)", &[]).unwrap().command;
        assert!(limits.validate_command(&long).is_err());

        let nul = prepare("UPDATE s SET a\0=1 WHERE a=0", &[]).unwrap().command;
        assert!(limits.validate_command(&nul).is_err());

        // Reads are never limited by identifier length
        let select = prepare("SELECT abcdefgh FROM s", &[]).unwrap().command;
        assert!(limits.validate_command(&select).is_ok());
    }
}
