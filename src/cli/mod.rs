//! # CLI Module
//!
//! Command implementations behind the `spotswap` binary.
//!
//! - [`serve`] - Loads the configuration and runs the HTTP service until it
//!   receives Ctrl-C or SIGTERM. Configuration problems are reported and the
//!   process exits with status 1 before anything is bound.
//! - [`keygen`] - Prints a freshly generated `ENCRYPTION_SECRET`.
//!
//! ## Usage
//!
//! ```bash
//! spotswap keygen                        # create a key for the .env file
//! spotswap serve                         # serve on SERVER_ADDRESS
//! spotswap serve --bind 127.0.0.1:9000   # override the bind address
//! ```
//!
//! Human-facing output uses the crate's `success!` / `warning!` / `error!`
//! macros; the running service logs through `tracing`.

mod keygen;
mod serve;

pub use keygen::keygen;
pub use serve::serve;
