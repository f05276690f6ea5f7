pub use crate::error::{Error, VrResult};
pub use crate::types::Timestamp;

pub use tracing::{debug, error, info, info_span, warn};

// vim: ts=4
