pub use vocal_royale_types::prelude::*;

pub use crate::app::App;

// vim: ts=4
