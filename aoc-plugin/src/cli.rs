//! CLI argument parsing using clap

use clap::{Parser, Subcommand};

/// Advent of Code helper
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Download inputs and submit answers for Advent of Code", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the current day's input to input.txt
    ///
    /// The puzzle is inferred from the working directory, which must be
    /// named aoc<year>/day<day>.
    Download,

    /// Submit an answer for part 1 or 2
    Submit {
        /// Part to submit
        #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
        part: u8,

        /// Answer to submit (read from stdin when omitted)
        answer: Option<String>,
    },

    /// Set the session cookie used to authenticate against adventofcode.com
    SetCookie {
        /// Session cookie value (prompted without echo when omitted)
        token: Option<String>,
    },
}
