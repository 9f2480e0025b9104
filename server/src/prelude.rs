pub use crate::core::app::App;
pub use scimdir_types::error::{Error, SdResult};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
