//! Spotify Token Swap Service Library
//!
//! This library implements a small proxy between a client application and the
//! Spotify Web API. It brokers the OAuth authorization-code and refresh-token
//! grants, encrypting refresh tokens before they leave the service so callers
//! never hold the real provider secret, and offers a single toggle operation
//! that flips playback between playing and paused.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints served to client applications
//! - `cli` - Command-line interface implementations
//! - `codec` - Authenticated encryption of refresh tokens
//! - `config` - Configuration management and environment variables
//! - `error` - Startup and request error types
//! - `management` - Token broker and playback toggler
//! - `server` - Router assembly and HTTP server lifecycle
//! - `spotify` - Spotify accounts service and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotswap::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotswap::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(&config).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for startup and CLI operations.
///
/// Request handling uses the typed [`error::Result`] instead; this boxed
/// form is for the outer layers where several unrelated error types meet
/// (configuration, TLS setup, socket binding).
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a success message with a green checkmark.
///
/// Used for human-facing CLI output. Service logging goes through `tracing`.
///
/// # Example
///
/// ```
/// success!("Generated a new encryption key");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal startup errors, before the server accepts any request.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
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
/// # Example
///
/// ```
/// warning!("Keep this key secret");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
