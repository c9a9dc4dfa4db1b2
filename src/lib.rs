//! Undofs: Path Namespace with Bounded Undo History
//!
//! An in-memory namespace of path-like entries. Every mutation records an
//! immutable snapshot on a capacity-bounded history stack, so the last `k`
//! changes can be rolled back.

pub mod collections;
pub mod config;
pub mod error;
pub mod logging;
pub mod namespace;
pub mod script;
pub mod tooling;
pub mod types;
