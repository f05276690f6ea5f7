//! Apple Music developer token endpoint

pub mod handler;

// vim: ts=4
