//! Helpers for traversing the call graph of a program.
mod walker;

pub use walker::CallGraphWalker;
