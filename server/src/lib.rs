//! Vocal Royale backend server.
//!
//! Serves the effective competition settings (read from PocketBase, with
//! defaults filled in), the derived song slots, and short-lived Apple Music
//! developer tokens for the frontend's music search.
//!
//! # Routes
//!
//! - `GET /api/settings`
//! - `GET /api/settings/songs?totalRounds=&numberOfFinalSongs=`
//! - `GET /api/apple-music/token`
//! - `GET /health`

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod apple_music;
pub mod config;
pub mod prelude;
pub mod routes;
pub mod settings;
pub mod webserver;

pub use config::ServerConfig;
pub use vocal_royale_core::{App, AppBuilder, AppState};
pub use webserver::run;

// vim: ts=4
