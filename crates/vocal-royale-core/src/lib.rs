//! Core utilities for Vocal Royale.
//!
//! - [`settings`]: effective competition configuration from a partial
//!   settings record, plus song count and song label derivation
//! - [`apple_music`]: ES256 developer token signing for the Apple Music API,
//!   cached while valid
//! - [`app`]: shared application state handed to the route handlers

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod apple_music;
pub mod prelude;
pub mod settings;

pub use app::{App, AppBuilder, AppState};
pub use apple_music::AppleMusicTokenSigner;

// vim: ts=4
