//! # inisql Storage
//!
//! INI file store adapter for inisql.
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
//! [`IniFileAdapter`] loads a whole [`Store`] from a classic sectioned
//! `key = value` file and writes it back after every successful mutation:
//!
//! ```text
//! save: render → <file>.tmp → fsync → rename over <file>
//! ```

use inisql_core::{KeyCase, Result, Store, StoreAdapter};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod format;

/// Suffix of the temporary file a durable save writes before renaming
const TEMP_SUFFIX: &str = "tmp";

/// Durability of saves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Write a temp file, fsync it, and rename it over the target
    Sync,
    /// Truncate and rewrite the target in place without fsync (fastest, unsafe for crashes)
    None,
}

/// INI format and write options
#[derive(Debug, Clone)]
pub struct IniOptions {
    /// Characters separating key from value; the first one is used when writing
    pub delimiters: Vec<char>,
    /// Characters that start a full-line comment
    pub comment_prefixes: Vec<char>,
    /// Write `key = value` instead of `key=value`
    pub space_around_delimiters: bool,
    /// Durability of saves
    pub sync_mode: SyncMode,
    /// Option key normalization on load, in statements, and on write
    pub key_case: KeyCase,
}

impl Default for IniOptions {
    fn default() -> Self {
        Self {
            delimiters: vec!['=', ':'],
            comment_prefixes: vec!['#', ';'],
            space_around_delimiters: true,
            sync_mode: SyncMode::Sync,
            key_case: KeyCase::Lower,
        }
    }
}

impl IniOptions {
    /// Set the key/value delimiters. An empty list keeps the current ones.
    pub fn with_delimiters(mut self, delimiters: impl IntoIterator<Item = char>) -> Self {
        let delimiters: Vec<char> = delimiters.into_iter().collect();
        if !delimiters.is_empty() {
            self.delimiters = delimiters;
        }
        self
    }

    /// Set the comment prefixes
    pub fn with_comment_prefixes(mut self, prefixes: impl IntoIterator<Item = char>) -> Self {
        self.comment_prefixes = prefixes.into_iter().collect();
        self
    }

    /// Toggle spaces around the delimiter when writing
    pub fn with_space_around_delimiters(mut self, enabled: bool) -> Self {
        self.space_around_delimiters = enabled;
        self
    }

    /// Set save durability
    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    /// Set option key normalization
    pub fn with_key_case(mut self, key_case: KeyCase) -> Self {
        self.key_case = key_case;
        self
    }

    /// Delimiter used when writing
    pub fn primary_delimiter(&self) -> char {
        self.delimiters.first().copied().unwrap_or('=')
    }
}

/// Store adapter backed by one INI file.
#[derive(Debug)]
pub struct IniFileAdapter {
    path: PathBuf,
    options: IniOptions,
}

impl IniFileAdapter {
    /// Adapter for `path` with default options
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_options(path, IniOptions::default())
    }

    /// Adapter for `path` with custom options
    pub fn with_options(path: impl AsRef<Path>, options: IniOptions) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options,
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format and write options
    pub fn options(&self) -> &IniOptions {
        &self.options
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    fn write_durable(&self, contents: &str) -> Result<()> {
        let temp_path = self.temp_path();
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn write_in_place(&self, contents: &str) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl StoreAdapter for IniFileAdapter {
    fn load(&mut self) -> Result<Store> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "backing file missing, starting empty");
                return Ok(Store::new());
            }
            Err(e) => return Err(e.into()),
        };

        let store = format::parse(&text, &self.options)?;
        info!(path = %self.path.display(), sections = store.len(), "loaded store");
        Ok(store)
    }

    fn save(&mut self, store: &Store) -> Result<()> {
        format::validate(store, &self.options)?;
        let contents = format::render(store, &self.options);

        match self.options.sync_mode {
            SyncMode::Sync => self.write_durable(&contents)?,
            SyncMode::None => self.write_in_place(&contents)?,
        }

        debug!(path = %self.path.display(), bytes = contents.len(), "saved store");
        Ok(())
    }

    fn key_case(&self) -> KeyCase {
        self.options.key_case
    }
}
