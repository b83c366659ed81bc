//! Shared utilities for the IR to SPD translator.
mod errors;
mod id;

pub use errors::{Error, ErrorKind, SpdResult};
pub use id::{GSym, GetName, Id};
