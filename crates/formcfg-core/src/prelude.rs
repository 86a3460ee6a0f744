pub use crate::app::App;
pub use formcfg_types::prelude::*;

// vim: ts=4
