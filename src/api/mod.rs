//! # API Module
//!
//! HTTP endpoints of the token swap service. Handlers only pull parameters
//! out of the request and pass them to the
//! [`management`](crate::management) layer; every outcome is turned into a
//! JSON (or empty) body with a status code.
//!
//! ## Endpoints
//!
//! ### Liveness
//!
//! - [`root`] - `GET /`, plain-text liveness string.
//! - [`health`] - `GET /health`, JSON status and crate version.
//!
//! ### Tokens
//!
//! - [`swap`] - `POST /swap` with form field `code`. Returns Spotify's token
//!   object with the `refresh_token` encrypted; status mirrors Spotify's.
//! - [`refresh`] - `POST /refresh` with form field `refresh_token` (a value
//!   previously returned by `/swap`). Answers `400 invalid_token` without
//!   contacting Spotify when the token does not decrypt.
//!
//! ### Playback
//!
//! - [`toggle`] - `PUT /toggle` with an `Authorization` header. Answers
//!   `{"is_playing": bool}` with `200`, an empty `204` when nothing plays, or
//!   Spotify's own error. Only routed when playback control is enabled.
//!
//! ## Errors
//!
//! Local failures render through [`AppError`](crate::error::AppError) as
//! `{"error": ..., "error_description": ...}`. Nothing internal is exposed.

mod health;
mod toggle;
mod token;

pub use health::{health, root};
pub use toggle::toggle;
pub use token::{refresh, swap};
