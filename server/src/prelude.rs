pub use vocal_royale_core::prelude::*;

// vim: ts=4
