pub use crate::error::{Error, FcResult};
pub use crate::types::{FieldId, FormTypeId, Patch, Timestamp, TnId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
