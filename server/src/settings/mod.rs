//! Competition settings endpoints

pub mod handler;

// vim: ts=4
