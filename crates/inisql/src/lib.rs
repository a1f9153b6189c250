//! # inisql
//!
//! Query and edit sectioned INI configuration files with a small SQL-like
//! statement language.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inisql::Interpreter;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open (or create) a backing file
//!     let sql = Interpreter::open("smb.conf")?;
//!
//!     // Every successful mutation is written straight back to the file
//!     sql.execute("INSERT INTO homes (comment=Home, browseable=no)", &[]);
//!     sql.execute("UPDATE homes SET browseable=yes WHERE browseable=no", &[]);
//!
//!     // Bind parameters with typed placeholders
//!     let result = sql.execute("SELECT * FROM global WHERE ?=?", &["workgroup".into(), "HOME".into()]);
//!     if let Some(rows) = result.rows() {
//!         for (key, value) in rows {
//!             println!("{} = {}", key, value);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Statements
//!
//! ```text
//! SELECT * | k1,k2,... FROM section [WHERE k=v [AND k=v]...]
//! INSERT INTO section (k=v, k=v, ...)
//! UPDATE section SET k=v WHERE k=v
//! DELETE FROM section WHERE k=v
//! DROP SECTION section
//! DROP OPTION key FROM section
//! ```
//!
//! Placeholders `%s`, `%i`, `%f`, `%b` and `?` are replaced left to right by
//! the parameters passed to [`Interpreter::execute`]. Tokens are split on
//! whitespace with no quoting, so names and values cannot hold whitespace
//! runs.
//!
//! WHERE conditions test the section as a whole: a section is a single
//! implicit row, so either every entry passes the filter or none does.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;
pub mod security;

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

// Re-export core types
pub use inisql_core::query::{Columns, Command, Condition, Placeholder, Verb};
pub use inisql_core::{
    Error, ErrorKind, ExecutionResult, KeyCase, MemoryAdapter, Param, ParamType, Result, Section,
    Store, StoreAdapter,
};

// Storage components
pub use inisql_storage::{IniFileAdapter, IniOptions, SyncMode};

pub use security::ResourceLimits;

use inisql_core::query::{bind_statement, Parser};
use inisql_core::Executor;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

struct InterpreterInner {
    store: Store,
    adapter: Box<dyn StoreAdapter>,
    limits: ResourceLimits,
    last_query: Option<String>,
}

/// Statement interpreter bound to one store and its backing medium.
///
/// Every [`execute`](Interpreter::execute) call holds one lock for its whole
/// duration, so the WHERE check and the write of an UPDATE or DELETE cannot
/// interleave with another statement. Cloning shares the same store.
///
/// # Examples
///
/// ```rust
/// use inisql::Interpreter;
///
/// let sql = Interpreter::in_memory()?;
/// assert!(sql.execute("INSERT INTO s (k=%i)", &[42.into()]).is_success());
///
/// let rows = sql.execute("SELECT * FROM s", &[]).into_rows().unwrap();
/// assert_eq!(rows["k"], "42");
/// # Ok::<(), inisql::Error>(())
/// ```
#[derive(Clone)]
pub struct Interpreter {
    inner: Arc<Mutex<InterpreterInner>>,
}

impl Interpreter {
    /// Opens the INI file at `path` with default options.
    ///
    /// A missing file starts as an empty store and is created by the first
    /// successful mutation.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, IniOptions::default())
    }

    /// Opens the INI file at `path` with custom format and write options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: IniOptions) -> Result<Self> {
        info!(path = %path.as_ref().display(), "opening inisql store");
        Self::with_adapter(IniFileAdapter::with_options(path, options))
    }

    /// Creates an interpreter over an empty in-memory store.
    pub fn in_memory() -> Result<Self> {
        Self::with_adapter(MemoryAdapter::new())
    }

    /// Creates an interpreter over any [`StoreAdapter`], loading the store once.
    pub fn with_adapter<A: StoreAdapter + 'static>(adapter: A) -> Result<Self> {
        let mut adapter: Box<dyn StoreAdapter> = Box::new(adapter);
        let store = adapter.load()?;
        Ok(Interpreter {
            inner: Arc::new(Mutex::new(InterpreterInner {
                store,
                adapter,
                limits: ResourceLimits::default(),
                last_query: None,
            })),
        })
    }

    /// Replaces the resource limits applied to every statement.
    pub fn with_limits(self, limits: ResourceLimits) -> Self {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .limits = limits;
        self
    }

    /// Executes one statement, binding `params` into its placeholders.
    ///
    /// Never panics and never returns an error directly: every failure is
    /// carried in [`ExecutionResult::Failed`]. A mutating statement is run
    /// on a staged copy of the store, and the copy only replaces the live
    /// store once the backing medium has been written.
    pub fn execute(&self, statement: &str, params: &[Param]) -> ExecutionResult {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(_) => return ExecutionResult::Failed(Error::LockPoisoned),
        };
        let result = inner.execute(statement, params);
        if let ExecutionResult::Failed(err) = &result {
            warn!(error = %err, "statement failed");
        }
        result
    }

    /// The last statement whose verb was recognized, after parameter binding.
    ///
    /// Recorded before the statement's clauses are checked, so a statement
    /// with a known verb but malformed clauses still replaces it.
    pub fn last_query(&self) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.last_query.clone())
    }

    /// A copy of the current store.
    pub fn snapshot(&self) -> Result<Store> {
        let inner = self.inner.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(inner.store.clone())
    }

    /// Discards the in-memory store and reads it again from the backing medium.
    pub fn reload(&self) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|_| Error::LockPoisoned)?;
        inner.store = inner.adapter.load()?;
        info!(sections = inner.store.len(), "reloaded store");
        Ok(())
    }
}

impl InterpreterInner {
    fn execute(&mut self, statement: &str, params: &[Param]) -> ExecutionResult {
        if let Err(err) = self.limits.validate_statement(statement, params) {
            return ExecutionResult::Failed(err);
        }

        let text = match bind_statement(statement, params) {
            Ok(text) => text,
            Err(err) => return ExecutionResult::Failed(err),
        };
        let parser = match Parser::new(&text) {
            Ok(parser) => parser,
            Err(err) => return ExecutionResult::Failed(err),
        };
        if let Err(err) = parser.verb() {
            return ExecutionResult::Failed(err);
        }
        debug!(statement = %text, "dispatching");
        self.last_query = Some(text.clone());

        let command = match parser.parse() {
            Ok(command) => command,
            Err(err) => return ExecutionResult::Failed(err),
        };
        if let Err(err) = self.limits.validate_command(&command) {
            return ExecutionResult::Failed(err);
        }

        if !command.is_mutating() {
            return Executor::new(&mut self.store, self.adapter.as_mut())
                .execute(command)
                .into();
        }

        let mut staged = self.store.clone();
        let result: ExecutionResult = Executor::new(&mut staged, self.adapter.as_mut())
            .execute(command)
            .into();
        if let ExecutionResult::Applied = result {
            self.store = staged;
        }
        result
    }
}
