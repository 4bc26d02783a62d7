//! The three plugin operations: download, submit, set-session
//!
//! Each operation runs synchronously on the invoking thread, converts every
//! failure into a single line on the host's error sink, and reports its own
//! elapsed wall-clock time. Context and credential checks run before any
//! network call is attempted.

use crate::context;
use crate::error::PluginError;
use crate::host::HostBridge;
use aoc_client::{AocClient, SubmissionOutcome};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use zeroize::Zeroizing;

/// Fixed filename the downloaded input is written to
pub const INPUT_FILE: &str = "input.txt";

/// Config key the session cookie is stored under
pub const SESSION_KEY: &str = "session";

/// What an operation reported back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpReport {
    /// False when the operation failed and a line went to the error sink
    pub success: bool,
    /// Wall-clock time the operation took
    pub elapsed: Duration,
}

/// The plugin operations, bound to an HTTP client
pub struct Operations {
    client: AocClient,
}

impl Operations {
    /// Create operations with a default client
    pub fn new() -> Result<Self, PluginError> {
        Ok(Self {
            client: AocClient::new()?,
        })
    }

    /// Create operations with a preconfigured client (custom base URL or
    /// timeout)
    pub fn with_client(client: AocClient) -> Self {
        Self { client }
    }

    /// Download the current day's input to `input.txt` and mark it read-only
    pub fn download(&self, host: &mut dyn HostBridge) -> OpReport {
        Self::timed(host, "download", |host| self.download_inner(host))
    }

    /// Submit an answer for part 1 or 2, taken from the host's selection or
    /// current line
    pub fn submit(&self, host: &mut dyn HostBridge, part: u8) -> OpReport {
        Self::timed(host, "submit", |host| self.submit_inner(host, part))
    }

    /// Store the session cookie under the host's configuration
    pub fn set_session(&self, host: &mut dyn HostBridge, token: &str) -> OpReport {
        Self::timed(host, "set_session", |host| {
            Self::set_session_inner(host, token)
        })
    }

    /// Run one operation: convert an error to one line on the error sink,
    /// then report the elapsed time on the output sink
    fn timed(
        host: &mut dyn HostBridge,
        name: &str,
        op: impl FnOnce(&mut dyn HostBridge) -> Result<(), PluginError>,
    ) -> OpReport {
        let start = Instant::now();
        let result = op(host);
        let elapsed = start.elapsed();

        let success = match result {
            Ok(()) => true,
            Err(e) => {
                host.write_error(&e.to_string());
                false
            }
        };
        host.write_output(&format!("> {} ({})", format_elapsed(elapsed), name));

        OpReport { success, elapsed }
    }

    /// Read the stored credential, failing before any network attempt when
    /// it is absent
    fn session(host: &dyn HostBridge) -> Result<Zeroizing<String>, PluginError> {
        host.config_value(SESSION_KEY)
            .map(Zeroizing::new)
            .filter(|s| !s.is_empty())
            .ok_or(PluginError::MissingCredential)
    }

    fn download_inner(&self, host: &mut dyn HostBridge) -> Result<(), PluginError> {
        let dir = host.working_dir()?;
        let ctx = context::resolve(&dir)?;
        let session = Self::session(host)?;

        let input = self.client.get_input(ctx.year, ctx.day, &session)?;
        write_input_file(&dir.join(INPUT_FILE), &input)?;

        host.write_output(&format!("Downloaded input for day {}", ctx.day));
        Ok(())
    }

    fn submit_inner(&self, host: &mut dyn HostBridge, part: u8) -> Result<(), PluginError> {
        let dir = host.working_dir()?;
        let ctx = context::resolve(&dir)?;
        let session = Self::session(host)?;
        let answer = host.current_line_or_selection()?;

        let outcome = self
            .client
            .submit_answer(ctx.year, ctx.day, part, &answer, &session)?;

        match outcome {
            SubmissionOutcome::Correct => host.write_output("Correct answer!"),
            SubmissionOutcome::Incorrect => host.write_error("Incorrect answer"),
            SubmissionOutcome::RateLimited { wait: Some(wait) } => host.write_error(&format!(
                "Too many attempts. Wait {}",
                humantime::format_duration(wait)
            )),
            SubmissionOutcome::RateLimited { wait: None } => {
                host.write_error("Too many attempts. Wait before submitting again")
            }
            SubmissionOutcome::Unrecognized(body) => {
                host.write_error(&format!("Unexpected response: {}", body))
            }
        }
        Ok(())
    }

    fn set_session_inner(host: &mut dyn HostBridge, token: &str) -> Result<(), PluginError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(PluginError::Config(
                "session cookie must not be empty".to_string(),
            ));
        }
        host.set_config_value(SESSION_KEY, token)?;
        host.write_output("Session cookie set");
        Ok(())
    }
}

/// Write the input artifact and mark it read-only
///
/// A previous artifact is itself read-only, so its permission bit is cleared
/// before the overwrite.
fn write_input_file(path: &Path, contents: &str) -> Result<(), PluginError> {
    if let Ok(metadata) = fs::metadata(path) {
        let mut perms = metadata.permissions();
        if perms.readonly() {
            set_writable(&mut perms);
            fs::set_permissions(path, perms)?;
        }
    }

    fs::write(path, contents)?;

    let mut perms = fs::metadata(path)?.permissions();
    set_readonly(&mut perms);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(unix)]
fn set_readonly(perms: &mut fs::Permissions) {
    use std::os::unix::fs::PermissionsExt;
    perms.set_mode(0o400);
}

#[cfg(not(unix))]
fn set_readonly(perms: &mut fs::Permissions) {
    perms.set_readonly(true);
}

#[cfg(unix)]
fn set_writable(perms: &mut fs::Permissions) {
    use std::os::unix::fs::PermissionsExt;
    perms.set_mode(0o600);
}

#[cfg(not(unix))]
fn set_writable(perms: &mut fs::Permissions) {
    perms.set_readonly(false);
}

/// Format an elapsed duration for the timing line
fn format_elapsed(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
