/// Execution result
///
/// The single value every statement execution produces.
use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Outcome of executing one statement
#[derive(Debug)]
pub enum ExecutionResult {
    /// SELECT succeeded; the key/value subset of the section
    Rows(IndexMap<String, String>),
    /// A mutating statement succeeded and the store was persisted
    Applied,
    /// A valid statement that matched nothing; the store is unchanged
    Unmatched,
    /// The statement failed
    Failed(Error),
}

impl ExecutionResult {
    /// The success flag
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Rows(_) | ExecutionResult::Applied)
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self, ExecutionResult::Unmatched)
    }

    /// Result mapping of a successful SELECT
    pub fn rows(&self) -> Option<&IndexMap<String, String>> {
        match self {
            ExecutionResult::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn into_rows(self) -> Option<IndexMap<String, String>> {
        match self {
            ExecutionResult::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// Error payload of a failed execution
    pub fn error(&self) -> Option<&Error> {
        match self {
            ExecutionResult::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn into_error(self) -> Option<Error> {
        match self {
            ExecutionResult::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// View for `?` callers: `Ok(Some(rows))` for a SELECT, `Ok(None)` for
    /// `Applied` and `Unmatched`, `Err` for a failure.
    pub fn into_result(self) -> Result<Option<IndexMap<String, String>>> {
        match self {
            ExecutionResult::Rows(rows) => Ok(Some(rows)),
            ExecutionResult::Applied | ExecutionResult::Unmatched => Ok(None),
            ExecutionResult::Failed(err) => Err(err),
        }
    }
}

impl From<Result<ExecutionResult>> for ExecutionResult {
    fn from(result: Result<ExecutionResult>) -> Self {
        result.unwrap_or_else(ExecutionResult::Failed)
    }
}

impl From<Error> for ExecutionResult {
    fn from(err: Error) -> Self {
        ExecutionResult::Failed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_success_flag() {
        assert!(ExecutionResult::Rows(IndexMap::new()).is_success());
        assert!(ExecutionResult::Applied.is_success());
        assert!(!ExecutionResult::Unmatched.is_success());
        assert!(ExecutionResult::Unmatched.error().is_none());
        assert!(!ExecutionResult::Failed(Error::LockPoisoned).is_success());
    }

    #[test]
    fn test_from_result_wraps_error() {
        let result = ExecutionResult::from(Err::<ExecutionResult, _>(Error::NotFound(
            "s".to_string(),
        )));
        assert_eq!(result.error().map(Error::kind), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_into_result() {
        let mut rows = IndexMap::new();
        rows.insert("k".to_string(), "v".to_string());
        let view = ExecutionResult::Rows(rows).into_result().unwrap();
        assert_eq!(view.map(|r| r.len()), Some(1));

        assert!(ExecutionResult::Unmatched.into_result().unwrap().is_none());
        let err = ExecutionResult::Failed(Error::LockPoisoned)
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LockPoisoned);
    }
}
