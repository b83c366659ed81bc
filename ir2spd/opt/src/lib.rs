//! # Call graph passes
//!
//! Translation to SPD is driven bottom-up over the call graph: a module can
//! only be instantiated once the modules of its callees exist, and the
//! latency of a module depends on the latency of its callees.
//!
//! [traversal::CallGraphWalker] visits functions in post-order from an entry
//! function and records the delay computed by [analysis::DelayEstimator] in a
//! [ModuleMap]. [EntryPolicy] selects the entry functions.
pub mod analysis;
mod entry;
mod module_map;
pub mod traversal;

pub use entry::{DEFAULT_ENTRY, EntryPolicy};
pub use module_map::ModuleMap;
