//! Host bridge: the capability surface an editor (or the CLI) provides

use crate::config::FileConfig;
use crate::error::PluginError;
use std::io::BufRead;
use std::path::PathBuf;

/// The narrow interface the operations need from their host
///
/// An editor integration implements this over its own API (cwd, variables,
/// current line or visual selection, message area); the bundled CLI host
/// implements it over the process environment. The operations have no other
/// dependency on the host.
pub trait HostBridge {
    /// Current working directory, used to resolve the puzzle context
    fn working_dir(&self) -> Result<PathBuf, PluginError>;

    /// Read a stored configuration value
    fn config_value(&self, key: &str) -> Option<String>;

    /// Store a configuration value; whether it persists beyond the host
    /// session is the host's choice
    fn set_config_value(&mut self, key: &str, value: &str) -> Result<(), PluginError>;

    /// The text to submit as an answer: the active selection when there is
    /// one, otherwise the current line
    fn current_line_or_selection(&mut self) -> Result<String, PluginError>;

    /// User-visible message sink
    fn write_output(&mut self, text: &str);

    /// User-visible error sink
    fn write_error(&mut self, text: &str);
}

/// Command-line host: cwd from the process, config in a file store,
/// "selection" from an argument with a stdin fallback, messages on
/// stdout/stderr
pub struct CliHost {
    config: FileConfig,
    selection: Option<String>,
}

impl CliHost {
    pub fn new(config: FileConfig, selection: Option<String>) -> Self {
        Self { config, selection }
    }
}

impl HostBridge for CliHost {
    fn working_dir(&self) -> Result<PathBuf, PluginError> {
        Ok(std::env::current_dir()?)
    }

    fn config_value(&self, key: &str) -> Option<String> {
        self.config.get(key)
    }

    fn set_config_value(&mut self, key: &str, value: &str) -> Result<(), PluginError> {
        self.config.set(key, value)
    }

    fn current_line_or_selection(&mut self) -> Result<String, PluginError> {
        if let Some(selection) = &self.selection {
            return Ok(selection.clone());
        }

        // No answer argument given: take one line from stdin
        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(PluginError::Config("no answer provided".to_string()));
        }
        Ok(line)
    }

    fn write_output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn write_error(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}
