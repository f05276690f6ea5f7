//! Apple Music developer token
//!
//! The Apple Music API authenticates callers with a short-lived ES256 JWT
//! ("developer token") signed with a MusicKit private key. This module
//! builds such tokens and keeps the last one around until it is about to
//! expire.
//!
//! # Configuration
//!
//! - `APPLE_MUSIC_DEVELOPER_TOKEN` - pre-built token, returned as-is
//! - `APPLE_MUSIC_KEY_ID` - MusicKit key identifier (`kid`)
//! - `APPLE_MUSIC_TEAM_ID` - developer team identifier (`iss`)
//! - `APPLE_MUSIC_PRIVATE_KEY_PATH` - path of the `.p8` private key
//! - `APPLE_MUSIC_TOKEN_TTL_DAYS` - token lifetime, 1..=180 days (default 7)
//!
//! Key id and team id fall back to the static secrets file.
//!
//! The feature is optional: every failure ends up as "no token", never as
//! an error returned to the caller.

pub mod clock;
pub mod config;
pub mod key;
pub mod signer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppleMusicConfig, SecretsFile};
pub use key::{FsKeyLoader, KeyLoader};
pub use signer::{AppleMusicTokenSigner, MissingCredential, SignedToken, TokenOutcome, TokenSource};

// vim: ts=4
