//! File-backed configuration store used by the CLI host

use crate::error::PluginError;
use std::fs;
use std::path::PathBuf;

/// File-per-key configuration store
///
/// Layout: `{dir}/{key}` with the raw value as the file contents. Values are
/// trimmed on read so a trailing newline from manual edits is harmless.
pub struct FileConfig {
    dir: PathBuf,
}

impl FileConfig {
    /// Create a store rooted at a specific directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Open the store at the platform config location
    /// (e.g. `~/.config/aoc-plugin` on Linux)
    pub fn open_default() -> Result<Self, PluginError> {
        let base = dirs::config_dir()
            .ok_or_else(|| PluginError::Config("no config directory available".to_string()))?;
        Ok(Self::new(base.join("aoc-plugin")))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read a value, or None when the key has never been set
    pub fn get(&self, key: &str) -> Option<String> {
        let content = fs::read_to_string(self.key_path(key)).ok()?;
        Some(content.trim().to_string())
    }

    /// Store a value, creating the config directory if needed
    pub fn set(&self, key: &str, value: &str) -> Result<(), PluginError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            PluginError::Config(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}
