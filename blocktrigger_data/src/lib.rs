//! Shared trigger definition schema for blocktrigger configuration.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_triggers};
