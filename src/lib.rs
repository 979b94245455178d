//! voxplay library
//!
//! A voice command front end for Spotify. An uploaded audio clip is
//! transcribed, interpreted as a `play <song> [by <artist>]` command and
//! turned into a playback request on the user's first Spotify device.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints
//! - `cli` - command implementations behind the binary
//! - `command` - transcript to intent parsing
//! - `config` - configuration from environment variables and `.env` files
//! - `error` - component error types
//! - `management` - credential store, token lifecycle and playback orchestration
//! - `server` - router, shared state and listener
//! - `spotify` - Spotify accounts service and Web API clients
//! - `types` - data structures shared across modules
//! - `utils` - small helpers
//! - `voice` - audio decoding, noise calibration and speech recognition

pub mod api;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod voice;

/// A convenient Result type alias for the binary and CLI layer.
///
/// Components return their own error enums; this boxed form is what they
/// collapse into once they reach the command line.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable failures of the binary itself (bad configuration,
/// a port that cannot be bound). Request handling must never call it; a
/// failed request is answered with an error response instead.
///
/// # Example
///
/// ```
/// error!("Failed to start server: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues: a corrupt token file that was discarded, a
/// failed refresh, an upstream error that is being reported to the client.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
