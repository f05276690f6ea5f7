//! Shared types, adapter traits, and core utilities for Vocal Royale.
//!
//! This crate contains the foundational types that are shared between the
//! server crate, the core utilities and the settings adapters.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod error;
pub mod prelude;
pub mod settings_adapter;
pub mod types;

// vim: ts=4
