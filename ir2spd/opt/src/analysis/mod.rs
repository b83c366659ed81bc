//! Analysis for programs.
//!
//! The analyses compute information about functions from the call graph
//! without changing the program.
mod delay;

pub use delay::{BASE_DELAY, CALL_OVERHEAD, DelayEstimator, DelayModel};
