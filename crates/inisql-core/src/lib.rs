//! # inisql Core
//!
//! Core types and the statement interpreter for inisql.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of inisql.**
//!
//! Users should depend on the main `inisql` crate instead, which provides the
//! stable public API. This crate's API may change without notice between
//! minor versions.
//!
//! ---
//!
//! ```text
//! statement + params → binder → tokenizer → parser → Command
//!                                                       ↓
//!                    ExecutionResult ← executor ← Store + StoreAdapter
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod query;
pub mod storage;
pub mod store;

pub use error::{Error, ErrorKind, Result};
pub use query::{prepare, Command, ExecutionResult, Executor, Param, ParamType, Prepared};
pub use storage::{MemoryAdapter, StoreAdapter};
pub use store::{KeyCase, Section, Store};

/// Execute a single statement directly against `store`.
///
/// Mutations are applied in place and saved through `adapter`. Callers that
/// need serialization or staged commits should go through the `inisql`
/// crate's `Interpreter` instead.
pub fn execute(
    store: &mut Store,
    adapter: &mut dyn StoreAdapter,
    statement: &str,
    params: &[Param],
) -> ExecutionResult {
    prepare(statement, params)
        .and_then(|prepared| Executor::new(store, adapter).execute(prepared.command))
        .into()
}
