// Common test utilities for INI adapter integration tests

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture that owns a temporary directory holding one INI file
pub struct IniTestFixture {
    #[allow(dead_code)]
    pub temp_dir: TempDir,
    pub ini_path: PathBuf,
}

impl IniTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let ini_path = temp_dir.path().join("smb.conf");
        Self { temp_dir, ini_path }
    }

    /// Fixture whose file starts with `contents`
    pub fn with_contents(contents: &str) -> Self {
        let fixture = Self::new();
        fs::write(&fixture.ini_path, contents).expect("Failed to seed INI file");
        fixture
    }

    #[allow(dead_code)]
    pub fn read(&self) -> String {
        fs::read_to_string(&self.ini_path).expect("Failed to read INI file")
    }
}

impl Default for IniTestFixture {
    fn default() -> Self {
        Self::new()
    }
}
