//! Advent of Code HTTP client library
//!
//! This library provides the network half of the AOC helper: fetching puzzle
//! input and submitting answers, with the submission response classified into
//! a small set of outcomes.
//!
//! # Features
//!
//! - Puzzle input fetching for any year and day
//! - Answer submission with the response classified into typed outcomes
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API with a bounded timeout
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use aoc_client::{AocClient, SubmissionOutcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = AocClient::new()?;
//!
//! // Your session cookie from adventofcode.com
//! let session = "your_session_cookie_here";
//!
//! // Fetch puzzle input
//! let input = client.get_input(2024, 1, session)?;
//!
//! // Submit an answer
//! let outcome = client.submit_answer(2024, 1, 1, "42", session)?;
//! match outcome {
//!     SubmissionOutcome::Correct => println!("Correct!"),
//!     SubmissionOutcome::Incorrect => println!("Incorrect"),
//!     SubmissionOutcome::RateLimited { wait } => {
//!         println!("Too many attempts: {:?}", wait);
//!     }
//!     SubmissionOutcome::Unrecognized(body) => {
//!         println!("Unexpected response: {}", body);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod classifier;
mod client;
mod error;

pub use classifier::SubmissionOutcome;
pub use client::{AocClient, AocClientBuilder, USER_AGENT};
pub use error::ClientError;
