/// Statement executor
///
/// Runs a parsed [`Command`] against a [`Store`], persisting through a
/// [`StoreAdapter`] after every successful mutation.
use super::ast::*;
use super::condition::apply_conditions;
use super::result::ExecutionResult;
use crate::error::{Error, Result};
use crate::storage::StoreAdapter;
use crate::store::Store;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

/// Query executor
pub struct Executor<'a> {
    store: &'a mut Store,
    adapter: &'a mut dyn StoreAdapter,
}

impl<'a> Executor<'a> {
    /// Create new executor
    pub fn new(store: &'a mut Store, adapter: &'a mut dyn StoreAdapter) -> Self {
        Self { store, adapter }
    }

    /// Execute a parsed command.
    ///
    /// Option keys are first normalized the way the adapter loads them.
    pub fn execute(&mut self, command: Command) -> Result<ExecutionResult> {
        let command = command.normalize_keys(self.adapter.key_case());
        debug!(verb = %command.verb(), "executing command");

        match command {
            Command::Select {
                columns,
                section,
                conditions,
            } => self.execute_select(&columns, &section, &conditions),
            Command::Insert {
                section,
                assignments,
            } => self.execute_insert(&section, &assignments),
            Command::Update {
                section,
                assignment,
                condition,
            } => self.execute_update(&section, &assignment, &condition),
            Command::Delete { section, condition } => self.execute_delete(&section, &condition),
            Command::DropSection { section } => self.execute_drop_section(&section),
            Command::DropOption { option, section } => self.execute_drop_option(&option, &section),
            Command::DropUnknown { target } => {
                warn!(drop_target = %target, "DROP target is neither SECTION nor OPTION");
                Ok(ExecutionResult::Unmatched)
            }
        }
    }

    fn execute_select(
        &self,
        columns: &Columns,
        section: &str,
        conditions: &[Condition],
    ) -> Result<ExecutionResult> {
        let source = self
            .store
            .section(section)
            .ok_or_else(|| Error::NotFound(section.to_string()))?;

        let projected: IndexMap<String, String> = match columns {
            Columns::All => source.entries().clone(),
            Columns::Keys(keys) => {
                let missing: Vec<String> = keys
                    .iter()
                    .filter(|key| !source.contains_key(key))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    return Err(Error::KeyNotFound(missing));
                }
                keys.iter()
                    .filter_map(|key| source.get(key).map(|v| (key.clone(), v.to_string())))
                    .collect()
            }
        };

        let rows = if conditions.is_empty() {
            projected
        } else {
            apply_conditions(projected, source, conditions)
        };

        debug!(section, rows = rows.len(), "select complete");
        Ok(ExecutionResult::Rows(rows))
    }

    fn execute_insert(&mut self, section: &str, assignments: &[Assignment]) -> Result<ExecutionResult> {
        if self.store.add_section(section)? {
            info!(section, "created section");
        }
        for assignment in assignments {
            self.store
                .set_value(section, &assignment.key, &assignment.value)?;
        }
        self.persist()?;
        Ok(ExecutionResult::Applied)
    }

    fn execute_update(
        &mut self,
        section: &str,
        assignment: &Assignment,
        condition: &Condition,
    ) -> Result<ExecutionResult> {
        if !self.current_value_matches(section, condition)? {
            debug!(section, condition = %condition, "update matched nothing");
            return Ok(ExecutionResult::Unmatched);
        }
        self.store
            .set_value(section, &assignment.key, &assignment.value)?;
        self.persist()?;
        Ok(ExecutionResult::Applied)
    }

    fn execute_delete(&mut self, section: &str, condition: &Condition) -> Result<ExecutionResult> {
        if !self.current_value_matches(section, condition)? {
            debug!(section, condition = %condition, "delete matched nothing");
            return Ok(ExecutionResult::Unmatched);
        }
        self.store.remove_option(section, &condition.key);
        self.persist()?;
        Ok(ExecutionResult::Applied)
    }

    fn execute_drop_section(&mut self, section: &str) -> Result<ExecutionResult> {
        self.store
            .remove_section(section)
            .ok_or_else(|| Error::NotFound(section.to_string()))?;
        info!(section, "dropped section");
        self.persist()?;
        Ok(ExecutionResult::Applied)
    }

    fn execute_drop_option(&mut self, option: &str, section: &str) -> Result<ExecutionResult> {
        if !self.store.has_section(section) {
            return Err(Error::NotFound(section.to_string()));
        }
        if !self.store.remove_option(section, option) {
            return Err(Error::OptionNotFound {
                option: option.to_string(),
                section: section.to_string(),
            });
        }
        info!(section, option, "dropped option");
        self.persist()?;
        Ok(ExecutionResult::Applied)
    }

    /// Section must exist; the condition key must currently hold exactly the expected value
    fn current_value_matches(&self, section: &str, condition: &Condition) -> Result<bool> {
        let source = self
            .store
            .section(section)
            .ok_or_else(|| Error::NotFound(section.to_string()))?;
        Ok(source.get(&condition.key) == Some(condition.value.as_str()))
    }

    fn persist(&mut self) -> Result<()> {
        self.adapter.save(&*self.store)?;
        info!(sections = self.store.len(), "store persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::query::parser::parse;
    use crate::storage::MemoryAdapter;
    use crate::store::KeyCase;

    fn fixture() -> (Store, MemoryAdapter) {
        let mut store = Store::new();
        store.add_section("global").unwrap();
        store.set_value("global", "workgroup", "HOME").unwrap();
        store.set_value("global", "security", "user").unwrap();
        (store, MemoryAdapter::new())
    }

    fn run(store: &mut Store, adapter: &mut MemoryAdapter, statement: &str) -> ExecutionResult {
        let command = parse(statement).unwrap();
        Executor::new(store, adapter).execute(command).into()
    }

    #[test]
    fn test_select_all() {
        let (mut store, mut adapter) = fixture();
        let result = run(&mut store, &mut adapter, "SELECT * FROM global");
        let rows = result.into_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows["workgroup"], "HOME");
        assert_eq!(adapter.save_count(), 0);
    }

    #[test]
    fn test_select_reports_every_missing_key() {
        let (mut store, mut adapter) = fixture();
        let result = run(&mut store, &mut adapter, "SELECT workgroup,a,b FROM global");
        match result.into_error() {
            Some(Error::KeyNotFound(keys)) => assert_eq!(keys, vec!["a", "b"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_select_where_is_section_wide() {
        let (mut store, mut adapter) = fixture();

        let rows = run(
            &mut store,
            &mut adapter,
            "SELECT workgroup FROM global WHERE security=user",
        )
        .into_rows()
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows["workgroup"], "HOME");

        let rows = run(
            &mut store,
            &mut adapter,
            "SELECT * FROM global WHERE security=share",
        )
        .into_rows()
        .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_insert_creates_section_and_persists() {
        let (mut store, mut adapter) = fixture();
        let result = run(&mut store, &mut adapter, "INSERT INTO user (name=alice, uid=1000)");
        assert!(matches!(result, ExecutionResult::Applied));
        assert_eq!(store.get_value("user", "uid"), Some("1000"));
        assert_eq!(adapter.saved(), &store);
    }

    #[test]
    fn test_update_requires_match() {
        let (mut store, mut adapter) = fixture();

        let result = run(
            &mut store,
            &mut adapter,
            "UPDATE global SET workgroup=WORK WHERE workgroup=OTHER",
        );
        assert!(result.is_unmatched());
        assert_eq!(store.get_value("global", "workgroup"), Some("HOME"));
        assert_eq!(adapter.save_count(), 0);

        let result = run(
            &mut store,
            &mut adapter,
            "UPDATE global SET workgroup=WORK WHERE workgroup=HOME",
        );
        assert!(result.is_success());
        assert_eq!(store.get_value("global", "workgroup"), Some("WORK"));
        assert_eq!(adapter.save_count(), 1);
    }

    #[test]
    fn test_update_missing_section() {
        let (mut store, mut adapter) = fixture();
        let result = run(&mut store, &mut adapter, "UPDATE nope SET a=1 WHERE a=0");
        assert_eq!(result.error().map(Error::kind), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_delete_requires_match() {
        let (mut store, mut adapter) = fixture();

        assert!(run(&mut store, &mut adapter, "DELETE FROM global WHERE security=share").is_unmatched());
        assert!(store.get_value("global", "security").is_some());

        assert!(run(&mut store, &mut adapter, "DELETE FROM global WHERE security=user").is_success());
        assert!(store.get_value("global", "security").is_none());
        assert_eq!(store.get_value("global", "workgroup"), Some("HOME"));
    }

    #[test]
    fn test_drop_section() {
        let (mut store, mut adapter) = fixture();
        assert!(run(&mut store, &mut adapter, "DROP SECTION global").is_success());
        assert!(!store.has_section("global"));

        let result = run(&mut store, &mut adapter, "DROP SECTION global");
        assert_eq!(result.error().map(Error::kind), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_drop_option() {
        let (mut store, mut adapter) = fixture();
        assert!(run(&mut store, &mut adapter, "DROP OPTION security FROM global").is_success());
        assert!(store.get_value("global", "security").is_none());

        let result = run(&mut store, &mut adapter, "DROP OPTION security FROM global");
        assert_eq!(result.error().map(Error::kind), Some(ErrorKind::OptionNotFound));

        let result = run(&mut store, &mut adapter, "DROP OPTION security FROM nope");
        assert_eq!(result.error().map(Error::kind), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_drop_unknown_is_plain_failure() {
        let (mut store, mut adapter) = fixture();
        let before = store.clone();
        let result = run(&mut store, &mut adapter, "DROP TABLE global");
        assert!(result.is_unmatched());
        assert!(result.error().is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_statement_keys_are_folded() {
        let (mut store, mut adapter) = fixture();

        let rows = run(&mut store, &mut adapter, "SELECT WorkGroup FROM global WHERE SECURITY=user")
            .into_rows()
            .unwrap();
        assert_eq!(rows["workgroup"], "HOME");

        assert!(run(&mut store, &mut adapter, "INSERT INTO global (Log=3)").is_success());
        assert_eq!(store.get_value("global", "log"), Some("3"));
        assert!(store.get_value("global", "Log").is_none());

        // Values keep their case
        assert!(run(&mut store, &mut adapter, "UPDATE global SET Log=High WHERE LOG=3").is_success());
        assert_eq!(store.get_value("global", "log"), Some("High"));

        assert!(run(&mut store, &mut adapter, "DROP OPTION LOG FROM global").is_success());
        assert!(store.get_value("global", "log").is_none());

        // Section names are never folded
        let result = run(&mut store, &mut adapter, "SELECT * FROM Global");
        assert_eq!(result.error().map(Error::kind), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_preserve_keeps_key_case() {
        let (mut store, _) = fixture();
        let mut adapter = MemoryAdapter::new().with_key_case(KeyCase::Preserve);

        assert!(run(&mut store, &mut adapter, "INSERT INTO global (Log=3)").is_success());
        assert_eq!(store.get_value("global", "Log"), Some("3"));

        let result = run(&mut store, &mut adapter, "SELECT WORKGROUP FROM global");
        assert_eq!(result.error().map(Error::kind), Some(ErrorKind::KeyNotFound));
    }
}
