//! aoc - command-line host for the Advent of Code helper operations

mod cli;
mod config;
mod context;
mod error;
mod host;
mod ops;

use clap::Parser;
use cli::{Args, Command};
use config::FileConfig;
use error::PluginError;
use host::CliHost;
use ops::Operations;
use zeroize::Zeroizing;

fn main() {
    let args = Args::parse();

    match run(args) {
        // Operation failures were already reported on the error sink
        Ok(report) if !report.success => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<ops::OpReport, PluginError> {
    let config = FileConfig::open_default()?;
    let ops = Operations::new()?;

    let report = match args.command {
        Command::Download => {
            let mut host = CliHost::new(config, None);
            ops.download(&mut host)
        }
        Command::Submit { part, answer } => {
            let mut host = CliHost::new(config, answer);
            ops.submit(&mut host, part)
        }
        Command::SetCookie { token } => {
            let token = match token {
                Some(t) => Zeroizing::new(t),
                None => prompt_token()?,
            };
            let mut host = CliHost::new(config, None);
            ops.set_session(&mut host, &token)
        }
    };

    Ok(report)
}

/// Prompt for the session cookie without echoing it
fn prompt_token() -> Result<Zeroizing<String>, PluginError> {
    let token = rpassword::prompt_password("Enter AOC session cookie: ")
        .map_err(|e| PluginError::Config(format!("Failed to read session cookie: {}", e)))?;
    if token.is_empty() {
        return Err(PluginError::Config("Session cookie is required.".to_string()));
    }
    Ok(Zeroizing::new(token))
}
